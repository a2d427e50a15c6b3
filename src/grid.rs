//! Owned `H×W` grid of cell configurations.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};

use crate::bitmask::Mask;
use crate::cell::{Cell, Direction};

/// Row-major grid of [`Cell`]s with an explicit stride.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Grid with every cell undisclosed.
    pub fn new(height: usize, width: usize) -> Self {
        Self::filled(height, width, Cell::Undisclosed)
    }

    pub fn filled(height: usize, width: usize, cell: Cell) -> Self {
        Grid {
            height,
            width,
            cells: vec![cell; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.width + col] = cell;
    }

    /// Signed lookup; `None` when the position is off-grid.
    #[inline]
    pub fn at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            None
        } else {
            Some(self.get(row as usize, col as usize))
        }
    }

    /// Neighbor of `(row, col)` in `dir`, `None` when off-grid.
    #[inline]
    pub fn neighbor(&self, row: usize, col: usize, dir: Direction) -> Option<Cell> {
        let (r, c) = dir.step(row as isize, col as isize);
        self.at(r, c)
    }

    /// Whether the signed position holds a ship cell; off-grid is empty.
    #[inline]
    pub fn occupied_at(&self, row: isize, col: isize) -> bool {
        self.at(row, col).is_some_and(Cell::is_occupied)
    }

    /// Whether the signed position is explicitly vacant.
    #[inline]
    pub fn vacant_at(&self, row: isize, col: isize) -> bool {
        self.at(row, col) == Some(Cell::Vacant)
    }

    /// Set an undisclosed cell to `cell`; returns whether it changed.
    /// Known cells are never overwritten.
    #[inline]
    pub fn fill(&mut self, row: isize, col: isize, cell: Cell) -> bool {
        if self.at(row, col) == Some(Cell::Undisclosed) {
            self.set(row as usize, col as usize, cell);
            true
        } else {
            false
        }
    }

    /// Iterate over `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i / w, i % w, c))
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).map(move |r| self.get(r, col))
    }

    /// Sum of all cell codes; changes whenever any cell changes, since
    /// every deduction raises a code.
    pub fn checksum(&self) -> i64 {
        self.cells.iter().map(|c| c.code() as i64).sum()
    }

    pub fn count<F>(&self, pred: F) -> usize
    where
        F: Fn(Cell) -> bool,
    {
        self.cells.iter().filter(|&&c| pred(c)).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.count(Cell::is_occupied)
    }

    pub fn vacant_count(&self) -> usize {
        self.count(|c| c == Cell::Vacant)
    }

    /// Mask of every ship cell.
    pub fn occupancy(&self) -> Mask {
        let mut mask = Mask::new(self.height, self.width);
        for (r, c, cell) in self.iter() {
            if cell.is_occupied() {
                mask.fill_rect(r, c, r + 1, c + 1);
            }
        }
        mask
    }

    /// Positions of the non-undisclosed cells.
    pub fn known_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.iter().filter(|&(_, _, c)| c.is_known())
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): (usize, usize)) -> &Cell {
        &self.cells[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Cell {
        &mut self.cells[row * self.width + col]
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid<{}x{}>:", self.height, self.width)?;
        fmt::Display::fmt(self, f)?;
        writeln!(f)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for cell in self.row(r) {
                write!(f, "{} ", cell)?;
            }
            if r + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
