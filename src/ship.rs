//! Ship placements and their renderings onto a grid.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::bitmask::Mask;
use crate::cell::Cell;
use crate::grid::Grid;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const fn index(self) -> usize {
        match self {
            Orientation::Horizontal => 0,
            Orientation::Vertical => 1,
        }
    }

    /// Height and width of the bounding box of a ship of `length`.
    pub const fn extent(self, length: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, length),
            Orientation::Vertical => (length, 1),
        }
    }
}

/// One ship at its top-left (or left-most/top-most) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    pub length: usize,
    pub orientation: Orientation,
    pub row: usize,
    pub col: usize,
}

impl ShipPlacement {
    pub const fn new(length: usize, orientation: Orientation, row: usize, col: usize) -> Self {
        Self {
            length,
            orientation,
            row,
            col,
        }
    }

    /// Whether the ship lies within an `height×width` grid.
    pub fn fits(&self, height: usize, width: usize) -> bool {
        let (h, w) = self.orientation.extent(self.length);
        self.length > 0 && self.row + h <= height && self.col + w <= width
    }

    /// Grid position of the `i`-th segment, counted from the top-left end.
    #[inline]
    pub fn segment(&self, i: usize) -> (usize, usize) {
        match self.orientation {
            Orientation::Horizontal => (self.row, self.col + i),
            Orientation::Vertical => (self.row + i, self.col),
        }
    }

    /// Iterator over the ship's cells.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |i| self.segment(i))
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells().any(|p| p == (row, col))
    }

    /// Refined configuration of the `i`-th segment.
    pub fn segment_cell(&self, i: usize) -> Cell {
        if self.length == 1 {
            return Cell::Single;
        }
        let last = i + 1 == self.length;
        match (self.orientation, i == 0, last) {
            (Orientation::Vertical, true, _) => Cell::North,
            (Orientation::Horizontal, true, _) => Cell::West,
            (Orientation::Vertical, _, true) => Cell::South,
            (Orientation::Horizontal, _, true) => Cell::East,
            _ => Cell::Inner,
        }
    }

    /// Index in the global search order: orientation, then row, then column.
    pub fn ordinal(&self, height: usize, width: usize) -> usize {
        self.orientation.index() * height * width + self.row * width + self.col
    }

    /// Footprint plus a one-cell margin on all sides, clamped to the grid.
    pub fn halo(&self, height: usize, width: usize) -> Mask {
        let mut mask = Mask::new(height, width);
        let (h, w) = self.orientation.extent(self.length);
        mask.fill_rect(
            self.row.saturating_sub(1),
            self.col.saturating_sub(1),
            self.row + h + 1,
            self.col + w + 1,
        );
        mask
    }
}

/// A full placement: one entry per ship, in fleet order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub ships: Vec<ShipPlacement>,
}

impl Placement {
    pub fn new(ships: Vec<ShipPlacement>) -> Self {
        Self { ships }
    }

    /// Mask of every ship cell.
    pub fn occupancy(&self, height: usize, width: usize) -> Mask {
        let mut mask = Mask::new(height, width);
        for ship in &self.ships {
            for (r, c) in ship.cells() {
                mask.fill_rect(r, c, r + 1, c + 1);
            }
        }
        mask
    }

    /// Full grid: refined ship segments, `Vacant` everywhere else.
    pub fn to_grid(&self, height: usize, width: usize) -> Grid {
        self.render_over(&Grid::filled(height, width, Cell::Vacant))
    }

    /// Draw the ships over `base`, keeping its other cells.
    pub fn render_over(&self, base: &Grid) -> Grid {
        let mut grid = base.clone();
        for ship in &self.ships {
            for i in 0..ship.length {
                let (r, c) = ship.segment(i);
                grid.set(r, c, ship.segment_cell(i));
            }
        }
        grid
    }

    pub fn row_sums(&self, height: usize) -> Vec<usize> {
        let mut sums = vec![0; height];
        for (r, _) in self.ships.iter().flat_map(ShipPlacement::cells) {
            sums[r] += 1;
        }
        sums
    }

    pub fn col_sums(&self, width: usize) -> Vec<usize> {
        let mut sums = vec![0; width];
        for (_, c) in self.ships.iter().flat_map(ShipPlacement::cells) {
            sums[c] += 1;
        }
        sums
    }

    /// Two placements are the same layout when they cover the same cells,
    /// whatever the order of equal-length ships.
    pub fn same_layout(&self, other: &Placement, height: usize, width: usize) -> bool {
        self.occupancy(height, width) == other.occupancy(height, width)
    }
}

impl fmt::Display for ShipPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = match self.orientation {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        };
        write!(f, "{}{}@({}, {})", self.length, o, self.row, self.col)
    }
}
