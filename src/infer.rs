//! Local inference over a working grid.
//!
//! [`propagate`] spreads the consequences of every known ship cell to its
//! neighbors, [`refine`] promotes generic ship cells to the refined label
//! their neighborhood determines, and [`completed_ships`] counts the ships
//! that are already closed at both ends.

use alloc::vec;
use alloc::vec::Vec;

use crate::cell::{Cell, Direction};
use crate::grid::Grid;

const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Fill in every cell deducible from the local shape of known ship cells.
///
/// Only undisclosed cells are written, so the pass never contradicts what
/// is already known and the set of known cells only grows. The rules are
/// re-applied until nothing changes, which makes a second call a no-op.
/// Returns whether anything changed.
pub fn propagate(grid: &mut Grid) -> bool {
    let mut changed = false;
    while propagate_once(grid) {
        changed = true;
    }
    changed
}

fn propagate_once(grid: &mut Grid) -> bool {
    let mut changed = false;
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let (r, c) = (row as isize, col as isize);
            match grid.get(row, col) {
                Cell::Single => {
                    for dr in -1..=1 {
                        for dc in -1..=1 {
                            changed |= grid.fill(r + dr, c + dc, Cell::Vacant);
                        }
                    }
                }
                Cell::Inner => {
                    for dir in Direction::ALL {
                        let (nr, nc) = dir.step(r, c);
                        let (sr, sc) = dir.clockwise().delta();
                        let across = match grid.at(nr, nc) {
                            Some(cell) if cell.is_occupied() => Some(Cell::Vacant),
                            None | Some(Cell::Vacant) => Some(Cell::Occupied),
                            Some(_) => None,
                        };
                        if let Some(fill) = across {
                            changed |= grid.fill(r + sr, c + sc, fill);
                            changed |= grid.fill(r - sr, c - sc, fill);
                        }
                    }
                }
                cell => {
                    if let Some(dir) = cell.facing() {
                        changed |= close_end(grid, r, c, dir);
                    }
                }
            }
        }
    }

    // Diagonals of every ship cell, including those promoted above.
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if grid.get(row, col).is_occupied() {
                for (dr, dc) in DIAGONALS {
                    changed |= grid.fill(row as isize + dr, col as isize + dc, Cell::Vacant);
                }
            }
        }
    }
    changed
}

/// An end facing `dir` is surrounded by water except at its rear, which
/// continues the hull.
fn close_end(grid: &mut Grid, r: isize, c: isize, dir: Direction) -> bool {
    let (dr, dc) = dir.delta();
    let (sr, sc) = dir.clockwise().delta();
    let mut changed = false;
    for (fr, fc) in [(dr, dc), (0, 0), (-dr, -dc)] {
        changed |= grid.fill(r + fr + sr, c + fc + sc, Cell::Vacant);
        changed |= grid.fill(r + fr - sr, c + fc - sc, Cell::Vacant);
    }
    changed |= grid.fill(r + dr, c + dc, Cell::Vacant);
    changed |= grid.fill(r - dr, c - dc, Cell::Occupied);
    changed
}

/// Water or the grid border.
#[inline]
fn is_closed(grid: &Grid, row: usize, col: usize, dir: Direction) -> bool {
    matches!(grid.neighbor(row, col, dir), None | Some(Cell::Vacant))
}

#[inline]
fn is_hull(grid: &Grid, row: usize, col: usize, dir: Direction) -> bool {
    grid.neighbor(row, col, dir).is_some_and(Cell::is_occupied)
}

/// Refined label that the neighborhood of a generic ship cell determines,
/// if any.
pub fn refined_label(grid: &Grid, row: usize, col: usize) -> Option<Cell> {
    use Direction::*;
    let closed = |d| is_closed(grid, row, col, d);
    let hull = |d| is_hull(grid, row, col, d);
    if closed(North) && hull(South) {
        Some(Cell::North)
    } else if closed(South) && hull(North) {
        Some(Cell::South)
    } else if closed(West) && hull(East) {
        Some(Cell::West)
    } else if closed(East) && hull(West) {
        Some(Cell::East)
    } else if Direction::ALL.iter().all(|&d| closed(d)) {
        Some(Cell::Single)
    } else if (hull(North) && hull(South)) || (hull(East) && hull(West)) {
        Some(Cell::Inner)
    } else {
        None
    }
}

/// Whether the neighborhood still supports the refined label at a cell.
fn supported(grid: &Grid, row: usize, col: usize, cell: Cell) -> bool {
    match cell {
        Cell::Single => Direction::ALL.iter().all(|&d| is_closed(grid, row, col, d)),
        Cell::Inner => {
            let hull = |d| is_hull(grid, row, col, d);
            (hull(Direction::North) && hull(Direction::South))
                || (hull(Direction::East) && hull(Direction::West))
        }
        end => match end.facing() {
            Some(d) => is_closed(grid, row, col, d) && is_hull(grid, row, col, d.opposite()),
            None => true,
        },
    }
}

/// Promote every generic ship cell whose label is determined.
///
/// Promotion only: refined and non-ship cells are returned unchanged.
pub fn refine(grid: &Grid) -> Grid {
    let mut out = grid.clone();
    for (row, col, cell) in grid.iter() {
        if cell == Cell::Occupied {
            if let Some(label) = refined_label(grid, row, col) {
                out.set(row, col, label);
            }
        }
    }
    out
}

/// Demote refined labels the neighborhood no longer supports, unless the
/// label was disclosed, then promote what is determined.
pub fn reconcile(grid: &Grid, disclosed: &Grid) -> Grid {
    let mut demoted = grid.clone();
    for (row, col, cell) in grid.iter() {
        if cell.is_refined()
            && !disclosed.get(row, col).is_refined()
            && !supported(grid, row, col, cell)
        {
            demoted.set(row, col, Cell::Occupied);
        }
    }
    refine(&demoted)
}

/// Ships already closed at both ends, by length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipCensus {
    /// `counts[len]` is the number of completed ships of length `len`.
    pub counts: Vec<usize>,
    /// A run of segments longer than the longest ship was found.
    pub overflow: bool,
}

impl ShipCensus {
    pub fn count(&self, length: usize) -> usize {
        self.counts.get(length).copied().unwrap_or(0)
    }

    /// Longest length with ships still unaccounted for, and how many.
    pub fn longest_unfinished(&self, histogram: &[usize]) -> Option<(usize, usize)> {
        (1..histogram.len())
            .rev()
            .find(|&len| self.count(len) < histogram[len])
            .map(|len| (len, histogram[len] - self.count(len)))
    }

    pub fn shortest_unfinished(&self, histogram: &[usize]) -> Option<usize> {
        (1..histogram.len()).find(|&len| self.count(len) < histogram[len])
    }
}

/// Count completed ships: runs from a north or west end through inner
/// segments to the matching south or east end, plus singles.
pub fn completed_ships(grid: &Grid, max_len: usize) -> ShipCensus {
    let mut census = ShipCensus {
        counts: vec![0; max_len + 1],
        overflow: false,
    };
    for (row, col, cell) in grid.iter() {
        let (dir, closing) = match cell {
            Cell::Single => {
                if max_len >= 1 {
                    census.counts[1] += 1;
                }
                continue;
            }
            Cell::North => (Direction::South, Cell::South),
            Cell::West => (Direction::East, Cell::East),
            _ => continue,
        };
        let mut len = 1;
        let (mut r, mut c) = dir.step(row as isize, col as isize);
        while grid.at(r, c) == Some(Cell::Inner) {
            len += 1;
            (r, c) = dir.step(r, c);
        }
        if grid.at(r, c) == Some(closing) {
            len += 1;
            if len > max_len {
                census.overflow = true;
            } else {
                census.counts[len] += 1;
            }
        } else if len >= max_len {
            census.overflow = true;
        }
    }
    census
}
