//! Step-wise deduction without search.
//!
//! The solver applies a ladder of human-usable rules until the grid stops
//! changing. It only grades puzzles; the exact solver is the ground truth.

use alloc::vec::Vec;

use crate::cell::{Cell, Direction};
use crate::common::Difficulty;
use crate::grid::Grid;
use crate::infer::{completed_ships, propagate, refine};
use crate::puzzle::Puzzle;

/// How far the rules got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// Every ship cell found with the first tier of rules.
    SimpleRules,
    /// Every ship cell found, and the gap rules were needed at least once.
    AdvancedRules,
    Unsolved,
}

impl Verdict {
    pub fn is_solved(self) -> bool {
        !matches!(self, Verdict::Unsolved)
    }
}

/// Result of [`deduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    pub grid: Grid,
    pub verdict: Verdict,
    /// Ship cells found.
    pub occupied: usize,
    /// Water cells found.
    pub vacant: usize,
    /// Iterations of the rule loop.
    pub passes: usize,
}

/// One row or column as a list of positions in scan order.
struct Line {
    sum: Option<usize>,
    cells: Vec<(usize, usize)>,
    /// The two directions across the line.
    across: [Direction; 2],
}

struct Lines {
    rows: Vec<Line>,
    cols: Vec<Line>,
    /// Ship cells in the hidden rows (columns) taken together.
    hidden_row_total: usize,
    hidden_col_total: usize,
}

impl Lines {
    fn new(puzzle: &Puzzle) -> Self {
        let (h, w) = (puzzle.height(), puzzle.width());
        let rows = (0..h)
            .map(|r| Line {
                sum: puzzle.row_sums()[r],
                cells: (0..w).map(|c| (r, c)).collect(),
                across: [Direction::North, Direction::South],
            })
            .collect();
        let cols = (0..w)
            .map(|c| Line {
                sum: puzzle.col_sums()[c],
                cells: (0..h).map(|r| (r, c)).collect(),
                across: [Direction::West, Direction::East],
            })
            .collect();
        Lines {
            rows,
            cols,
            hidden_row_total: puzzle.ship_cells().saturating_sub(puzzle.disclosed_row_total()),
            hidden_col_total: puzzle.ship_cells().saturating_sub(puzzle.disclosed_col_total()),
        }
    }

    fn groups(&self) -> [(&[Line], usize); 2] {
        [
            (&self.rows, self.hidden_row_total),
            (&self.cols, self.hidden_col_total),
        ]
    }
}

fn fill_line(grid: &mut Grid, line: &Line, cell: Cell) {
    for &(r, c) in &line.cells {
        grid.fill(r as isize, c as isize, cell);
    }
}

/// Run the rule ladder on the puzzle's disclosed cells.
///
/// The gap rules are only available when `difficulty` allows them; they are
/// switched on whenever the first tier stalls and off again when they stall
/// too.
pub fn deduce(puzzle: &Puzzle, difficulty: Difficulty) -> Deduction {
    let lines = Lines::new(puzzle);
    let histogram = puzzle.histogram();
    let longest = puzzle.longest_ship();
    let gap_rules = difficulty.uses_gap_rules();

    let mut grid = puzzle.disclosed().clone();
    let mut checksum = grid.checksum();
    let mut gaps_on = false;
    let mut needed_gaps = false;
    let mut passes = 0;

    loop {
        passes += 1;
        let before = checksum;

        propagate(&mut grid);
        for (group, hidden_total) in lines.groups() {
            saturate(&mut grid, group, hidden_total);
        }
        grid = refine(&grid);

        let census = completed_ships(&grid, longest);
        let ship_max = census.longest_unfinished(&histogram).map_or(0, |(len, _)| len);
        for (group, _) in lines.groups() {
            complete_stripes(&mut grid, group, ship_max);
        }

        checksum = grid.checksum();
        if gap_rules {
            if checksum == before {
                gaps_on = !gaps_on;
            } else if gaps_on {
                needed_gaps = true;
            }
        }

        if gap_rules && gaps_on {
            grid = refine(&grid);
            let census = completed_ships(&grid, longest);
            if let Some(ship_min) = census.shortest_unfinished(&histogram) {
                exclude_short_gaps(&mut grid, ship_min);
            }
            if let Some((ship_max, remaining)) = census.longest_unfinished(&histogram) {
                if ship_max > 1 {
                    fill_gaps(&mut grid, &lines, ship_max, remaining);
                }
            }
        }

        if checksum == before && !gaps_on {
            break;
        }
    }

    let occupied = grid.occupied_count();
    let vacant = grid.vacant_count();
    let verdict = if occupied == puzzle.ship_cells() {
        if gap_rules && needed_gaps {
            Verdict::AdvancedRules
        } else {
            Verdict::SimpleRules
        }
    } else {
        Verdict::Unsolved
    };
    log::trace!("deduction: {:?} after {} passes", verdict, passes);
    Deduction {
        grid,
        verdict,
        occupied,
        vacant,
        passes,
    }
}

/// A line holding all its ship cells gets water elsewhere; a line whose
/// unknown cells are exactly the missing ship cells gets ships there.
/// Hidden lines are treated jointly against their combined total.
fn saturate(grid: &mut Grid, lines: &[Line], hidden_total: usize) {
    let mut hidden_occupied = 0;
    let mut hidden_unknown = 0;
    for line in lines {
        let occupied = line
            .cells
            .iter()
            .filter(|&&(r, c)| grid.get(r, c).is_occupied())
            .count();
        let unknown = line
            .cells
            .iter()
            .filter(|&&(r, c)| !grid.get(r, c).is_known())
            .count();
        match line.sum {
            Some(sum) if occupied == sum => fill_line(grid, line, Cell::Vacant),
            Some(sum) if sum.checked_sub(occupied) == Some(unknown) => {
                fill_line(grid, line, Cell::Occupied)
            }
            Some(_) => {}
            None => {
                hidden_occupied += occupied;
                hidden_unknown += unknown;
            }
        }
    }

    let hidden = lines.iter().filter(|l| l.sum.is_none());
    if hidden_occupied == hidden_total {
        for line in hidden {
            fill_line(grid, line, Cell::Vacant);
        }
    } else if hidden_total.checked_sub(hidden_occupied) == Some(hidden_unknown) {
        for line in hidden {
            fill_line(grid, line, Cell::Occupied);
        }
    }
}

/// Close off runs of ship cells as long as the longest unfinished ship.
/// A run of one is only closed when nothing touches it across the line.
fn complete_stripes(grid: &mut Grid, lines: &[Line], ship_max: usize) {
    for line in lines {
        let mut k = 1;
        for (j, &(r, c)) in line.cells.iter().enumerate() {
            if !grid.get(r, c).is_occupied() {
                k = 1;
                continue;
            }
            if k < ship_max {
                k += 1;
                continue;
            }
            let isolated = line
                .across
                .iter()
                .all(|&d| !grid.neighbor(r, c, d).is_some_and(Cell::is_occupied));
            if ship_max > 1 || isolated {
                if let Some(&(nr, nc)) = line.cells.get(j + 1) {
                    grid.fill(nr as isize, nc as isize, Cell::Vacant);
                }
                if let Some(&(pr, pc)) = j.checked_sub(k).and_then(|p| line.cells.get(p)) {
                    grid.fill(pr as isize, pc as isize, Cell::Vacant);
                }
            }
        }
    }
}

/// Length of the run of non-water cells through `(row, col)` along `dir`
/// and its opposite, capped at `cap`.
fn open_run(grid: &Grid, row: usize, col: usize, dir: Direction, cap: usize) -> usize {
    let mut len = 1;
    for d in [dir, dir.opposite()] {
        let (mut r, mut c) = d.step(row as isize, col as isize);
        while len < cap && grid.at(r, c).is_some_and(|cell| cell != Cell::Vacant) {
            len += 1;
            (r, c) = d.step(r, c);
        }
    }
    len
}

/// Unknown cells whose open runs in both directions are shorter than the
/// shortest unfinished ship become water.
fn exclude_short_gaps(grid: &mut Grid, ship_min: usize) {
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if grid.get(row, col) != Cell::Undisclosed {
                continue;
            }
            if open_run(grid, row, col, Direction::South, ship_min) < ship_min
                && open_run(grid, row, col, Direction::East, ship_min) < ship_min
            {
                grid.set(row, col, Cell::Vacant);
            }
        }
    }
}

/// A maximal stretch of non-water cells inside one line.
struct Gap<'a> {
    line: &'a Line,
    start: usize,
    len: usize,
}

/// Count how many of the longest unfinished ships the open gaps can hold.
/// When that capacity equals the number still to place, every gap is
/// packed full and the cells shared by all its packings hold ships.
fn fill_gaps(grid: &mut Grid, lines: &Lines, ship_max: usize, remaining: usize) {
    let mut capacity = 0;
    let mut full_gaps: Vec<Gap<'_>> = Vec::with_capacity(remaining);
    for (group, hidden_total) in lines.groups() {
        for line in group {
            let qualifies = match line.sum {
                Some(sum) => sum >= ship_max,
                None => hidden_total >= ship_max,
            };
            if !qualifies {
                continue;
            }
            let open = |i: usize| {
                let (r, c) = line.cells[i];
                grid.get(r, c) != Cell::Vacant
            };
            let n = line.cells.len();
            let mut j = 0;
            while j < n {
                let (r, c) = line.cells[j];
                if grid.get(r, c) != Cell::Undisclosed {
                    j += 1;
                    continue;
                }
                let mut start = j;
                while start > 0 && open(start - 1) {
                    start -= 1;
                }
                let mut end = j + 1;
                while end < n && open(end) {
                    end += 1;
                }
                let len = end - start;
                if len >= ship_max && full_gaps.len() < remaining {
                    full_gaps.push(Gap { line, start, len });
                }
                capacity += (len + 1) / (ship_max + 1);
                j = end;
            }
        }
    }

    if capacity != remaining {
        return;
    }
    let stride = ship_max + 1;
    let mut writes = Vec::new();
    for gap in &full_gaps {
        let slack = (gap.len + 1) % stride;
        for copy in 0..(gap.len + 1) / stride {
            for offset in slack..ship_max {
                writes.push(gap.line.cells[gap.start + copy * stride + offset]);
            }
        }
    }
    for (r, c) in writes {
        grid.fill(r as isize, c as isize, Cell::Occupied);
    }
}
