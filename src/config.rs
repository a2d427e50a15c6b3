use crate::common::{Difficulty, MalformedInput};

/// Smallest supported grid side.
pub const SIZE_MIN: usize = 7;
/// Largest supported grid side.
pub const SIZE_MAX: usize = 25;

/// Fleet used whenever the shorter grid side is [`SIZE_MIN`].
pub const MIN_GRID_FLEET: [usize; 7] = [4, 4, 3, 3, 2, 2, 2];

/// Recursive calls allowed to one random placement attempt.
pub const PLACEMENT_CALL_LIMIT: usize = 1200;
/// Random placement attempts before a ship is dropped from the fleet.
pub const PLACEMENT_ATTEMPTS: usize = 5;

/// Exact-solver budget used while calibrating an Unreasonable puzzle.
pub const UNREASONABLE_BUDGET: usize = 600;
/// Minimum exact-solver work for a puzzle to count as Unreasonable.
pub const UNREASONABLE_MIN_CALLS: usize = 50;

/// Calibration steps after which the generator reports an internal error.
pub const CALIBRATION_CAP: usize = 20_000;

/// User-controlled parameters for puzzle generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameParams {
    pub height: usize,
    pub width: usize,
    pub difficulty: Difficulty,
}

impl GameParams {
    pub const fn new(height: usize, width: usize, difficulty: Difficulty) -> Self {
        Self {
            height,
            width,
            difficulty,
        }
    }

    /// Reject grid sizes outside `SIZE_MIN..=SIZE_MAX`.
    pub fn validate(&self) -> Result<(), MalformedInput> {
        let ok = |n: usize| (SIZE_MIN..=SIZE_MAX).contains(&n);
        if ok(self.height) && ok(self.width) {
            Ok(())
        } else {
            Err(MalformedInput::GridSize {
                height: self.height,
                width: self.width,
            })
        }
    }
}

impl Default for GameParams {
    fn default() -> Self {
        Self::new(8, 10, Difficulty::Intermediate)
    }
}

/// Named parameter presets.
pub const PRESETS: [(&str, GameParams); 9] = [
    ("7x7 Basic", GameParams::new(7, 7, Difficulty::Basic)),
    ("8x10 Basic", GameParams::new(8, 10, Difficulty::Basic)),
    ("8x10 Intermediate", GameParams::new(8, 10, Difficulty::Intermediate)),
    ("8x10 Advanced", GameParams::new(8, 10, Difficulty::Advanced)),
    ("8x10 Unreasonable", GameParams::new(8, 10, Difficulty::Unreasonable)),
    ("10x12 Basic", GameParams::new(10, 12, Difficulty::Basic)),
    ("10x12 Intermediate", GameParams::new(10, 12, Difficulty::Intermediate)),
    ("10x12 Advanced", GameParams::new(10, 12, Difficulty::Advanced)),
    ("10x12 Unreasonable", GameParams::new(10, 12, Difficulty::Unreasonable)),
];

/// Look up a preset by its name, ignoring ASCII case.
pub fn preset(name: &str) -> Option<GameParams> {
    PRESETS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, p)| p)
}
