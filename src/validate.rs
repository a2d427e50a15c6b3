//! Consistency check of a filled-in grid against a puzzle.

use alloc::vec;
use alloc::vec::Vec;

use crate::{
    bitmask::Mask,
    cell::{Cell, Direction},
    common::{MalformedInput, PuzzleError},
    grid::Grid,
    infer::{completed_ships, refine},
    puzzle::Puzzle,
};

/// Error flags and completion state of a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Cells taking part in a local contradiction.
    pub cell_errors: Mask,
    pub row_errors: Vec<bool>,
    pub col_errors: Vec<bool>,
    /// One flag per ship in fleet order: a completed ship of its length
    /// is on the grid.
    pub ship_done: Vec<bool>,
    /// Completed ships do not fit the fleet.
    pub fleet_error: bool,
    pub solved: bool,
}

impl Validation {
    /// No error flag is raised.
    pub fn is_clean(&self) -> bool {
        self.cell_errors.is_empty()
            && !self.row_errors.iter().any(|&e| e)
            && !self.col_errors.iter().any(|&e| e)
            && !self.fleet_error
    }
}

/// Check `grid` against the puzzle's sums, fleet and disclosed cells, and
/// report whether it is a complete solution.
///
/// Generic ship cells count as finished ships once their neighborhood fixes
/// a label, so a fully filled grid solves with or without labels.
pub fn validate(puzzle: &Puzzle, grid: &Grid) -> Result<Validation, PuzzleError> {
    let (h, w) = (puzzle.height(), puzzle.width());
    if grid.height() != h || grid.width() != w {
        return Err(MalformedInput::DisclosedShape.into());
    }

    let mut cell_errors = Mask::new(h, w);
    for (r, c, cell) in grid.iter() {
        let disclosed = puzzle.disclosed().get(r, c);
        if cell_conflict(grid, r, c, cell) || disagrees(disclosed, cell) {
            cell_errors.set(r, c)?;
        }
    }
    let mut solved = cell_errors.is_empty();

    let mut row_errors = vec![false; h];
    for (r, sum) in puzzle.row_sums().iter().enumerate() {
        if let Some(sum) = *sum {
            let line: Vec<Cell> = grid.row(r).to_vec();
            row_errors[r] = line_overfull(&line, sum);
            solved &= occupied_in(&line) == sum;
        }
    }
    let mut col_errors = vec![false; w];
    for (c, sum) in puzzle.col_sums().iter().enumerate() {
        if let Some(sum) = *sum {
            let line: Vec<Cell> = grid.column(c).collect();
            col_errors[c] = line_overfull(&line, sum);
            solved &= occupied_in(&line) == sum;
        }
    }

    let labelled = refine(grid);
    let histogram = puzzle.histogram();
    let census = completed_ships(&labelled, puzzle.longest_ship());
    let fleet_error =
        census.overflow || (1..histogram.len()).any(|len| census.count(len) > histogram[len]);
    let mut ship_done = vec![false; puzzle.ships().len()];
    if fleet_error {
        solved = false;
    } else {
        let mut found = census.counts.clone();
        for (done, &len) in ship_done.iter_mut().zip(puzzle.ships()) {
            if found[len] > 0 {
                found[len] -= 1;
                *done = true;
            } else {
                solved = false;
            }
        }
    }

    if solved {
        solved = labelled.count(Cell::is_refined) == puzzle.ship_cells();
    }

    Ok(Validation {
        cell_errors,
        row_errors,
        col_errors,
        ship_done,
        fleet_error,
        solved,
    })
}

fn occupied_in(line: &[Cell]) -> usize {
    line.iter().filter(|c| c.is_occupied()).count()
}

/// More ship cells than the sum, or more water than the rest of the line.
fn line_overfull(line: &[Cell], sum: usize) -> bool {
    let vacant = line.iter().filter(|&&c| c == Cell::Vacant).count();
    occupied_in(line) > sum || vacant > line.len().saturating_sub(sum)
}

/// A disclosed cell must be kept once filled in; a disclosed generic ship
/// cell may be refined.
fn disagrees(disclosed: Cell, cell: Cell) -> bool {
    match (disclosed, cell) {
        (Cell::Undisclosed, _) | (_, Cell::Undisclosed) => false,
        (Cell::Occupied, cell) => !cell.is_occupied(),
        (other, cell) => other != cell,
    }
}

/// Local contradictions between a cell and its neighbors.
fn cell_conflict(grid: &Grid, r: usize, c: usize, cell: Cell) -> bool {
    let at = |d: Direction| grid.neighbor(r, c, d);
    let occupied = |d: Direction| at(d).is_some_and(Cell::is_occupied);
    // A ship cell toward `d` that cannot continue a hull through here.
    let foreign = |d: Direction| {
        at(d).is_some_and(|n| {
            n != Cell::end(d)
                && !matches!(
                    n,
                    Cell::Undisclosed | Cell::Vacant | Cell::Occupied | Cell::Inner
                )
        })
    };
    let (ri, ci) = (r as isize, c as isize);

    if cell.is_occupied() {
        let diagonal = [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .iter()
            .any(|&(dr, dc)| grid.occupied_at(ri + dr, ci + dc));
        if diagonal {
            return true;
        }
    }

    match cell {
        Cell::Undisclosed => false,
        Cell::Vacant => Direction::ALL.iter().any(|&d| {
            let side = d.clockwise();
            match at(d) {
                // The hull of that end runs through this cell.
                Some(n) if n == Cell::end(d) => true,
                // An inner segment whose axis is forced through this cell.
                Some(Cell::Inner) => {
                    let (nr, nc) = d.step(ri, ci);
                    let (fr, fc) = d.step(nr, nc);
                    let (sr, sc) = side.delta();
                    grid.occupied_at(fr, fc)
                        || grid.vacant_at(nr + sr, nc + sc)
                        || grid.vacant_at(nr - sr, nc - sc)
                }
                Some(_) => false,
                // Along the border an inner neighbor must run through here.
                None => at(side) == Some(Cell::Inner) || at(side.opposite()) == Some(Cell::Inner),
            }
        }),
        Cell::Occupied => Direction::ALL.iter().any(|&d| foreign(d)),
        Cell::Single => Direction::ALL.iter().any(|&d| occupied(d)),
        Cell::Inner => Direction::ALL.iter().any(|&d| {
            let side = d.clockwise();
            let border = at(d).is_none()
                && (occupied(d.opposite())
                    || matches!(at(side), None | Some(Cell::Vacant))
                    || matches!(at(side.opposite()), None | Some(Cell::Vacant)));
            let corner = at(d) == Some(Cell::Vacant) && at(side) == Some(Cell::Vacant);
            let bent = at(d) == Some(Cell::Vacant) && occupied(d.opposite());
            foreign(d) || border || corner || bent
        }),
        end => match end.facing() {
            Some(d) => {
                let rear = at(d.opposite());
                occupied(d)
                    || occupied(d.clockwise())
                    || occupied(d.clockwise().opposite())
                    || rear.is_none()
                    || rear.is_some_and(|n| {
                        !(n == Cell::end(d.opposite())
                            || matches!(n, Cell::Undisclosed | Cell::Occupied | Cell::Inner))
                    })
            }
            None => false,
        },
    }
}
