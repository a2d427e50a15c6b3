// Exhaustive backtracking search over ship placements.
// Proves existence and uniqueness of a solution within an optional budget.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::ControlFlow;

use crate::{
    bitmask::Mask,
    cell::{Cell, Direction},
    common::PuzzleError,
    grid::Grid,
    infer::propagate,
    puzzle::Puzzle,
    ship::{Orientation, Placement, ShipPlacement},
};

/// What the exact search established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Exactly one placement satisfies the puzzle.
    Unique(Placement),
    /// At least two distinct placements satisfy the puzzle.
    Ambiguous(Placement, Placement),
    Infeasible,
    /// The search was cut short; nothing can be concluded.
    BudgetExceeded,
}

/// Outcome plus the number of placement attempts spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub outcome: SolveOutcome,
    pub calls: usize,
}

impl Solution {
    pub fn is_unique(&self) -> bool {
        matches!(self.outcome, SolveOutcome::Unique(_))
    }

    /// The unique placement, or the error describing why there is none.
    pub fn into_result(self) -> Result<Placement, PuzzleError> {
        match self.outcome {
            SolveOutcome::Unique(p) => Ok(p),
            SolveOutcome::Ambiguous(..) => Err(PuzzleError::Ambiguous),
            SolveOutcome::Infeasible => Err(PuzzleError::Infeasible),
            SolveOutcome::BudgetExceeded => Err(PuzzleError::BudgetExceeded),
        }
    }
}

/// Search for every placement of the fleet consistent with the puzzle,
/// stopping at the second one.
///
/// `budget` bounds the number of recursive placement attempts; `None` or
/// `Some(0)` searches without limit.
pub fn solve(puzzle: &Puzzle, budget: Option<usize>) -> Solution {
    let mut search = Search::new(puzzle, budget.filter(|&b| b > 0));
    let flow = search.place(0, 0);
    let outcome = match (flow, search.first.take(), search.second.take()) {
        (_, Some(a), Some(b)) => SolveOutcome::Ambiguous(a, b),
        (ControlFlow::Break(Stop::Budget), _, _) => SolveOutcome::BudgetExceeded,
        (_, Some(a), None) => SolveOutcome::Unique(a),
        (_, None, _) => SolveOutcome::Infeasible,
    };
    log::trace!("exact search finished after {} calls", search.calls);
    Solution {
        outcome,
        calls: search.calls,
    }
}

/// Render the unique solution as a full grid, or report why there is none.
pub fn solve_grid(puzzle: &Puzzle) -> Result<Grid, PuzzleError> {
    let placement = solve(puzzle, None).into_result()?;
    Ok(placement.to_grid(puzzle.height(), puzzle.width()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Budget,
    SecondSolution,
}

struct Search<'a> {
    puzzle: &'a Puzzle,
    height: usize,
    width: usize,
    /// Disclosed cells plus what local inference adds.
    known: Grid,
    /// Cells known to hold a ship.
    required: Mask,
    occupied: Mask,
    /// Exclusion halo of every placed ship but the last.
    halos: Vec<Mask>,
    current: Vec<ShipPlacement>,
    row_counts: Vec<usize>,
    col_counts: Vec<usize>,
    hidden_row_count: usize,
    hidden_col_count: usize,
    /// Ship cells left for the hidden rows and columns.
    hidden_row_cap: usize,
    hidden_col_cap: usize,
    calls: usize,
    budget: Option<usize>,
    first: Option<Placement>,
    second: Option<Placement>,
}

impl<'a> Search<'a> {
    fn new(puzzle: &'a Puzzle, budget: Option<usize>) -> Self {
        let (height, width) = (puzzle.height(), puzzle.width());
        let mut known = puzzle.disclosed().clone();
        propagate(&mut known);
        let required = known.occupancy();
        let ships = puzzle.ships().len();
        Search {
            puzzle,
            height,
            width,
            known,
            required,
            occupied: Mask::new(height, width),
            halos: vec![Mask::new(height, width); ships],
            current: Vec::with_capacity(ships),
            row_counts: vec![0; height],
            col_counts: vec![0; width],
            hidden_row_count: 0,
            hidden_col_count: 0,
            hidden_row_cap: puzzle.ship_cells().saturating_sub(puzzle.disclosed_row_total()),
            hidden_col_cap: puzzle.ship_cells().saturating_sub(puzzle.disclosed_col_total()),
            calls: 0,
            budget,
            first: None,
            second: None,
        }
    }

    /// Try every position of ship `index` from ordinal `start` on.
    fn place(&mut self, index: usize, start: usize) -> ControlFlow<Stop> {
        self.calls += 1;
        if self.budget.is_some_and(|b| self.calls > b) {
            return ControlFlow::Break(Stop::Budget);
        }

        let length = self.puzzle.ships()[index];
        let last = index + 1 == self.puzzle.ships().len();
        let area = self.height * self.width;
        for ordinal in start..2 * area {
            let orientation = if ordinal < area {
                Orientation::Horizontal
            } else if length > 1 {
                Orientation::Vertical
            } else {
                break;
            };
            let (row, col) = ((ordinal % area) / self.width, ordinal % self.width);
            let ship = ShipPlacement::new(length, orientation, row, col);
            if !ship.fits(self.height, self.width) || !self.admissible(&ship, index) {
                continue;
            }

            self.add(&ship);
            let flow = if last {
                if self.complete() {
                    self.record()
                } else {
                    ControlFlow::Continue(())
                }
            } else if self.within_sums(&ship) {
                match self.halo(&ship) {
                    Some(halo) => {
                        self.halos[index] = halo;
                        let next = self.puzzle.ships()[index + 1];
                        let next_start = if next == length { ordinal + 1 } else { 0 };
                        self.place(index + 1, next_start)
                    }
                    None => ControlFlow::Continue(()),
                }
            } else {
                ControlFlow::Continue(())
            };
            self.remove(&ship);
            flow?;
        }
        ControlFlow::Continue(())
    }

    /// Cell-level checks against the known grid and earlier halos.
    fn admissible(&self, ship: &ShipPlacement, index: usize) -> bool {
        let (r0, c0) = ship.segment(0);
        let (r1, c1) = ship.segment(ship.length - 1);
        if self.known.get(r0, c0) == Cell::Inner || self.known.get(r1, c1) == Cell::Inner {
            return false;
        }
        if ship.length == 1
            && !matches!(
                self.known.get(r0, c0),
                Cell::Undisclosed | Cell::Occupied | Cell::Single
            )
        {
            return false;
        }
        ship.cells().all(|(r, c)| {
            self.known.get(r, c) != Cell::Vacant
                && !self.halos[..index].iter().any(|h| h.contains(r, c))
        })
    }

    fn add(&mut self, ship: &ShipPlacement) {
        let (h, w) = ship.orientation.extent(ship.length);
        self.occupied.fill_rect(ship.row, ship.col, ship.row + h, ship.col + w);
        for (r, c) in ship.cells() {
            self.row_counts[r] += 1;
            self.col_counts[c] += 1;
            if self.puzzle.row_sums()[r].is_none() {
                self.hidden_row_count += 1;
            }
            if self.puzzle.col_sums()[c].is_none() {
                self.hidden_col_count += 1;
            }
        }
        self.current.push(*ship);
    }

    fn remove(&mut self, ship: &ShipPlacement) {
        let (h, w) = ship.orientation.extent(ship.length);
        self.occupied.clear_rect(ship.row, ship.col, ship.row + h, ship.col + w);
        for (r, c) in ship.cells() {
            self.row_counts[r] -= 1;
            self.col_counts[c] -= 1;
            if self.puzzle.row_sums()[r].is_none() {
                self.hidden_row_count -= 1;
            }
            if self.puzzle.col_sums()[c].is_none() {
                self.hidden_col_count -= 1;
            }
        }
        self.current.pop();
    }

    /// No disclosed sum exceeded, hidden lines within their joint total.
    fn within_sums(&self, ship: &ShipPlacement) -> bool {
        let rows = self.puzzle.row_sums();
        let cols = self.puzzle.col_sums();
        ship.cells().all(|(r, c)| {
            rows[r].map_or(true, |s| self.row_counts[r] <= s)
                && cols[c].map_or(true, |s| self.col_counts[c] <= s)
        }) && self.hidden_row_count <= self.hidden_row_cap
            && self.hidden_col_count <= self.hidden_col_cap
    }

    /// Halo of a freshly placed ship: its margin plus every saturated line.
    /// `None` when the halo would cover a cell known to hold a ship that no
    /// placed ship covers yet.
    fn halo(&self, ship: &ShipPlacement) -> Option<Mask> {
        let mut halo = ship.halo(self.height, self.width);
        let hidden_rows_full = self.hidden_row_count == self.hidden_row_cap;
        for (r, sum) in self.puzzle.row_sums().iter().enumerate() {
            let full = match sum {
                Some(s) => self.row_counts[r] == *s,
                None => hidden_rows_full,
            };
            if full {
                halo.fill_row(r);
            }
        }
        let hidden_cols_full = self.hidden_col_count == self.hidden_col_cap;
        for (c, sum) in self.puzzle.col_sums().iter().enumerate() {
            let full = match sum {
                Some(s) => self.col_counts[c] == *s,
                None => hidden_cols_full,
            };
            if full {
                halo.fill_col(c);
            }
        }
        let pending = self.required.and_not(&self.occupied);
        (!halo.intersects(&pending)).then_some(halo)
    }

    /// Final checks once every ship is down.
    fn complete(&self) -> bool {
        let rows_ok = self
            .puzzle
            .row_sums()
            .iter()
            .zip(&self.row_counts)
            .all(|(sum, &n)| sum.map_or(true, |s| s == n));
        let cols_ok = self
            .puzzle
            .col_sums()
            .iter()
            .zip(&self.col_counts)
            .all(|(sum, &n)| sum.map_or(true, |s| s == n));
        rows_ok
            && cols_ok
            && self.required.is_subset(&self.occupied)
            && self.known.known_cells().all(|(r, c, cell)| {
                !cell.is_refined()
                    || cell.agrees_with(|d: Direction| {
                        let (nr, nc) = d.step(r as isize, c as isize);
                        self.occupied.contains_at(nr, nc)
                    })
            })
    }

    fn record(&mut self) -> ControlFlow<Stop> {
        let placement = Placement::new(self.current.clone());
        if self.first.is_none() {
            self.first = Some(placement);
            ControlFlow::Continue(())
        } else {
            self.second = Some(placement);
            ControlFlow::Break(Stop::SecondSolution)
        }
    }
}
