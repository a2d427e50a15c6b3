//! Commonly used types and functions for ease of import.

pub use crate::{
    deduce, generate, propagate, solve, validate, Cell, Difficulty, GameParams, Grid,
    Placement, Puzzle, PuzzleError, ShipPlacement, SolveOutcome, Verdict,
};

#[cfg(feature = "std")]
pub use crate::init_logging;
