//! Immutable puzzle definition: fleet, row/column sums and disclosed cells.

use alloc::vec;
use alloc::vec::Vec;

use crate::common::{MalformedInput, PuzzleError};
use crate::config::{SIZE_MAX, SIZE_MIN};
use crate::grid::Grid;

/// A puzzle as handed to the solvers.
///
/// Sums are `None` when hidden. A hidden sum is withheld from the solver but
/// the true placement still satisfies it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Puzzle {
    height: usize,
    width: usize,
    ships: Vec<usize>,
    row_sums: Vec<Option<usize>>,
    col_sums: Vec<Option<usize>>,
    disclosed: Grid,
}

impl Puzzle {
    /// Build and validate a definition. Ship lengths are sorted descending.
    pub fn new(
        height: usize,
        width: usize,
        mut ships: Vec<usize>,
        row_sums: Vec<Option<usize>>,
        col_sums: Vec<Option<usize>>,
        disclosed: Grid,
    ) -> Result<Self, PuzzleError> {
        let in_range = |n: usize| (SIZE_MIN..=SIZE_MAX).contains(&n);
        if !in_range(height) || !in_range(width) {
            return Err(MalformedInput::GridSize { height, width }.into());
        }
        if ships.is_empty() {
            return Err(MalformedInput::EmptyFleet.into());
        }
        let longest = height.min(width);
        if let Some(&bad) = ships.iter().find(|&&len| len == 0 || len > longest) {
            return Err(MalformedInput::ShipLength(bad).into());
        }
        if row_sums.len() != height {
            return Err(MalformedInput::RowCount {
                expected: height,
                found: row_sums.len(),
            }
            .into());
        }
        if col_sums.len() != width {
            return Err(MalformedInput::ColumnCount {
                expected: width,
                found: col_sums.len(),
            }
            .into());
        }
        for (row, sum) in row_sums.iter().enumerate() {
            if let Some(sum) = *sum {
                if sum > width {
                    return Err(MalformedInput::RowSum { row, sum }.into());
                }
            }
        }
        for (col, sum) in col_sums.iter().enumerate() {
            if let Some(sum) = *sum {
                if sum > height {
                    return Err(MalformedInput::ColumnSum { col, sum }.into());
                }
            }
        }
        if disclosed.height() != height || disclosed.width() != width {
            return Err(MalformedInput::DisclosedShape.into());
        }
        ships.sort_unstable_by(|a, b| b.cmp(a));
        Ok(Puzzle {
            height,
            width,
            ships,
            row_sums,
            col_sums,
            disclosed,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Ship lengths, longest first.
    pub fn ships(&self) -> &[usize] {
        &self.ships
    }

    pub fn row_sums(&self) -> &[Option<usize>] {
        &self.row_sums
    }

    pub fn col_sums(&self) -> &[Option<usize>] {
        &self.col_sums
    }

    pub fn disclosed(&self) -> &Grid {
        &self.disclosed
    }

    pub fn longest_ship(&self) -> usize {
        self.ships[0]
    }

    /// Count of ships per length; index 0 is unused.
    pub fn histogram(&self) -> Vec<usize> {
        let mut hist = vec![0; self.longest_ship() + 1];
        for &len in &self.ships {
            hist[len] += 1;
        }
        hist
    }

    /// Total number of ship cells.
    pub fn ship_cells(&self) -> usize {
        self.ships.iter().sum()
    }

    /// Sum over the disclosed row sums.
    pub fn disclosed_row_total(&self) -> usize {
        self.row_sums.iter().flatten().sum()
    }

    pub fn disclosed_col_total(&self) -> usize {
        self.col_sums.iter().flatten().sum()
    }

    pub fn hidden_rows(&self) -> usize {
        self.row_sums.iter().filter(|s| s.is_none()).count()
    }

    pub fn hidden_cols(&self) -> usize {
        self.col_sums.iter().filter(|s| s.is_none()).count()
    }

    /// Same fleet and sums with another disclosed map.
    pub fn with_disclosed(&self, disclosed: Grid) -> Result<Self, PuzzleError> {
        if disclosed.height() != self.height || disclosed.width() != self.width {
            return Err(MalformedInput::DisclosedShape.into());
        }
        Ok(Puzzle {
            disclosed,
            ..self.clone()
        })
    }
}
