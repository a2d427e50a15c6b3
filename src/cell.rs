//! Cell configurations and compass directions.

use core::fmt;

use crate::common::{MalformedInput, PuzzleError};

/// One of the four compass directions on the grid. Rows grow southwards,
/// columns grow eastwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Row/column offset of one step in this direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The direction a quarter turn clockwise.
    pub const fn clockwise(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// Position one step from `(row, col)`, possibly off-grid.
    #[inline]
    pub fn step(self, row: isize, col: isize) -> (isize, isize) {
        let (dr, dc) = self.delta();
        (row + dr, col + dc)
    }
}

/// Configuration of a single cell.
///
/// `Occupied` is the generic ship cell. The six refined variants are a view
/// over it: a ship end facing a direction (its hull continues the opposite
/// way), a single-cell ship, or an inner segment. `code()` matches the integer
/// scale used for checksums: unknown < vacant < occupied < refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Undisclosed,
    Vacant,
    Occupied,
    North,
    East,
    South,
    West,
    Single,
    Inner,
}

impl Cell {
    /// Integer code of the configuration, `-2..=6`.
    pub const fn code(self) -> i8 {
        match self {
            Cell::Undisclosed => -2,
            Cell::Vacant => -1,
            Cell::Occupied => 0,
            Cell::North => 1,
            Cell::East => 2,
            Cell::South => 3,
            Cell::West => 4,
            Cell::Single => 5,
            Cell::Inner => 6,
        }
    }

    /// True for the generic and every refined ship cell.
    #[inline]
    pub const fn is_occupied(self) -> bool {
        self.code() >= 0
    }

    #[inline]
    pub const fn is_refined(self) -> bool {
        self.code() > 0
    }

    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Cell::Undisclosed)
    }

    /// The ship end facing `dir`.
    pub const fn end(dir: Direction) -> Cell {
        match dir {
            Direction::North => Cell::North,
            Direction::East => Cell::East,
            Direction::South => Cell::South,
            Direction::West => Cell::West,
        }
    }

    /// Direction an end cell faces, `None` for every other configuration.
    pub const fn facing(self) -> Option<Direction> {
        match self {
            Cell::North => Some(Direction::North),
            Cell::East => Some(Direction::East),
            Cell::South => Some(Direction::South),
            Cell::West => Some(Direction::West),
            _ => None,
        }
    }

    /// Forget the refinement, keeping only "this is a ship cell".
    pub const fn generic(self) -> Cell {
        if self.is_occupied() {
            Cell::Occupied
        } else {
            self
        }
    }

    /// Whether this configuration agrees with the occupancy of the four
    /// orthogonal neighbors, given the cell itself is part of a ship.
    /// `occupied(dir)` reports whether the neighbor in `dir` holds a ship
    /// cell (off-grid counts as empty).
    pub fn agrees_with<F>(self, occupied: F) -> bool
    where
        F: Fn(Direction) -> bool,
    {
        match self {
            Cell::Undisclosed | Cell::Vacant | Cell::Occupied => true,
            Cell::Single => Direction::ALL.iter().all(|&d| !occupied(d)),
            Cell::Inner => {
                (occupied(Direction::North) && occupied(Direction::South))
                    || (occupied(Direction::East) && occupied(Direction::West))
            }
            end => match end.facing() {
                Some(d) => {
                    !occupied(d)
                        && occupied(d.opposite())
                        && !occupied(d.clockwise())
                        && !occupied(d.clockwise().opposite())
                }
                None => true,
            },
        }
    }

    /// Character used by the text renderings of a grid.
    pub const fn symbol(self) -> char {
        match self {
            Cell::Undisclosed => '·',
            Cell::Vacant => '~',
            Cell::Occupied => '#',
            Cell::North => '^',
            Cell::East => '>',
            Cell::South => 'v',
            Cell::West => '<',
            Cell::Single => 'o',
            Cell::Inner => '=',
        }
    }
}

impl TryFrom<i8> for Cell {
    type Error = PuzzleError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Ok(match code {
            -2 => Cell::Undisclosed,
            -1 => Cell::Vacant,
            0 => Cell::Occupied,
            1 => Cell::North,
            2 => Cell::East,
            3 => Cell::South,
            4 => Cell::West,
            5 => Cell::Single,
            6 => Cell::Inner,
            other => {
                return Err(PuzzleError::MalformedInput(MalformedInput::CellCode(other)))
            }
        })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
