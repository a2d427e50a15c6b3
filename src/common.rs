//! Common types for the puzzle engine: errors and difficulty tiers.

use core::fmt;
use core::str::FromStr;

use crate::bitmask::MaskError;

/// Target difficulty of a generated puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Solvable with sum counting and local inference alone.
    Basic,
    /// Like `Basic`, with fewer cells disclosed.
    Intermediate,
    /// Needs the gap rules of the logical solver at least once.
    Advanced,
    /// Beyond the logical solver; uniqueness proven by search.
    Unreasonable,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Basic,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Unreasonable,
    ];

    /// Numeric tier, `0..=3`.
    pub const fn code(self) -> u8 {
        match self {
            Difficulty::Basic => 0,
            Difficulty::Intermediate => 1,
            Difficulty::Advanced => 2,
            Difficulty::Unreasonable => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Unreasonable => "unreasonable",
        }
    }

    /// Whether the second tier of deduction rules is available.
    pub const fn uses_gap_rules(self) -> bool {
        self.code() > Difficulty::Intermediate.code()
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = PuzzleError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Difficulty::ALL
            .get(code as usize)
            .copied()
            .ok_or(PuzzleError::MalformedInput(MalformedInput::DifficultyCode(code)))
    }
}

impl FromStr for Difficulty {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or(PuzzleError::MalformedInput(MalformedInput::DifficultyName))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

/// Reasons a puzzle definition or parameter set is rejected before solving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedInput {
    /// Height or width outside the supported range.
    GridSize { height: usize, width: usize },
    /// The fleet has no ships.
    EmptyFleet,
    /// A ship of length zero or longer than the shorter grid side.
    ShipLength(usize),
    /// Number of row sums differs from the height.
    RowCount { expected: usize, found: usize },
    /// Number of column sums differs from the width.
    ColumnCount { expected: usize, found: usize },
    /// A row sum larger than the width.
    RowSum { row: usize, sum: usize },
    /// A column sum larger than the height.
    ColumnSum { col: usize, sum: usize },
    /// Disclosed grid has a different shape than the puzzle.
    DisclosedShape,
    /// Cell code outside `-2..=6`.
    CellCode(i8),
    /// Difficulty code outside `0..=3`.
    DifficultyCode(u8),
    /// Difficulty name not recognised.
    DifficultyName,
}

/// Errors returned by the solving core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// No placement satisfies the constraints.
    Infeasible,
    /// More than one placement satisfies the constraints.
    Ambiguous,
    /// The exact solver ran out of its work budget before deciding.
    BudgetExceeded,
    /// Input rejected before any solving began.
    MalformedInput(MalformedInput),
    /// An internal invariant was violated.
    Internal(&'static str),
}

impl From<MalformedInput> for PuzzleError {
    fn from(err: MalformedInput) -> Self {
        PuzzleError::MalformedInput(err)
    }
}

impl From<MaskError> for PuzzleError {
    fn from(_: MaskError) -> Self {
        PuzzleError::Internal("mask coordinate out of range")
    }
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedInput::GridSize { height, width } => write!(
                f,
                "grid {}x{} outside the supported range {}..={}",
                height,
                width,
                crate::config::SIZE_MIN,
                crate::config::SIZE_MAX
            ),
            MalformedInput::EmptyFleet => write!(f, "at least one ship is required"),
            MalformedInput::ShipLength(len) => {
                write!(f, "ship length {} does not fit the grid", len)
            }
            MalformedInput::RowCount { expected, found } => {
                write!(f, "expected {} row sums, found {}", expected, found)
            }
            MalformedInput::ColumnCount { expected, found } => {
                write!(f, "expected {} column sums, found {}", expected, found)
            }
            MalformedInput::RowSum { row, sum } => {
                write!(f, "row {} sum {} exceeds the width", row, sum)
            }
            MalformedInput::ColumnSum { col, sum } => {
                write!(f, "column {} sum {} exceeds the height", col, sum)
            }
            MalformedInput::DisclosedShape => {
                write!(f, "disclosed grid does not match the puzzle size")
            }
            MalformedInput::CellCode(code) => write!(f, "unknown cell code {}", code),
            MalformedInput::DifficultyCode(code) => {
                write!(f, "unknown difficulty rating {}", code)
            }
            MalformedInput::DifficultyName => write!(f, "unknown difficulty rating"),
        }
    }
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::Infeasible => write!(f, "No solution exists for this puzzle"),
            PuzzleError::Ambiguous => write!(f, "Multiple solutions exist for this puzzle"),
            PuzzleError::BudgetExceeded => write!(f, "Search budget exceeded"),
            PuzzleError::MalformedInput(e) => write!(f, "Malformed input: {}", e),
            PuzzleError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PuzzleError {}
