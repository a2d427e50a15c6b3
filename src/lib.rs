#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitmask;
mod cell;
mod common;
mod config;
pub mod generator;
mod grid;
pub mod infer;
pub mod logic;
#[cfg(feature = "std")]
mod logging;
pub mod placer;
pub mod prelude;
mod puzzle;
mod ship;
pub mod solver;
pub mod validate;

pub use bitmask::{BitMask, Mask, MaskError};
pub use cell::{Cell, Direction};
pub use common::*;
pub use config::*;
pub use generator::{generate, GeneratedPuzzle, GenerationStats};
pub use grid::Grid;
pub use infer::{completed_ships, propagate, reconcile, refine, ShipCensus};
pub use logic::{deduce, Deduction, Verdict};
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level, LOG_ENV};
pub use placer::{place_fleet, PlacedFleet};
pub use puzzle::Puzzle;
pub use ship::*;
pub use solver::{solve, solve_grid, Solution, SolveOutcome};
pub use validate::{validate, Validation};
