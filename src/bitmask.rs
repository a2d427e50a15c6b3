//! A runtime-sized bit mask over an `H×W` grid.
//!
//! Bits are packed row-major into a vector of unsigned words `T`. The solvers
//! keep one mask for the occupancy of the current placement and one exclusion
//! halo per ship; the validator reports per-cell errors as a mask.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{BitOr, BitOrAssign};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by mask operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// Row or column index is out of bounds.
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

/// Mask used throughout the crate.
pub type Mask = BitMask<u64>;

/// A grid of booleans stored as packed words of type `T`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitMask<T = u64>
where
    T: PrimInt + Unsigned + Zero,
{
    height: usize,
    width: usize,
    words: Vec<T>,
}

impl<T> BitMask<T>
where
    T: PrimInt + Unsigned + Zero,
{
    const WORD_BITS: usize = mem::size_of::<T>() * 8;

    /// Create an empty mask (all bits cleared).
    pub fn new(height: usize, width: usize) -> Self {
        let bits = height * width;
        let len = bits.div_ceil(Self::WORD_BITS);
        BitMask {
            height,
            width,
            words: vec![T::zero(); len],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn locate(&self, row: usize, col: usize) -> (usize, usize) {
        let idx = row * self.width + col;
        (idx / Self::WORD_BITS, idx % Self::WORD_BITS)
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<(), MaskError> {
        if row >= self.height || col >= self.width {
            Err(MaskError::IndexOutOfBounds { row, col })
        } else {
            Ok(())
        }
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Gets the bit at (row, col); coordinates outside the grid read as unset.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        let (w, b) = self.locate(row, col);
        ((self.words[w] >> b) & T::one()) != T::zero()
    }

    /// Signed-coordinate lookup used when probing neighbors.
    #[inline]
    pub fn contains_at(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && self.contains(row as usize, col as usize)
    }

    /// Sets the bit at (row, col) to 1.
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), MaskError> {
        self.check_bounds(row, col)?;
        let (w, b) = self.locate(row, col);
        self.words[w] = self.words[w] | (T::one() << b);
        Ok(())
    }

    /// Sets every bit of the rectangle `[row0, row1) × [col0, col1)`,
    /// clamped to the grid.
    pub fn fill_rect(&mut self, row0: usize, col0: usize, row1: usize, col1: usize) {
        for r in row0..row1.min(self.height) {
            for c in col0..col1.min(self.width) {
                let (w, b) = self.locate(r, c);
                self.words[w] = self.words[w] | (T::one() << b);
            }
        }
    }

    /// Clears every bit of the rectangle `[row0, row1) × [col0, col1)`,
    /// clamped to the grid.
    pub fn clear_rect(&mut self, row0: usize, col0: usize, row1: usize, col1: usize) {
        for r in row0..row1.min(self.height) {
            for c in col0..col1.min(self.width) {
                let (w, b) = self.locate(r, c);
                self.words[w] = self.words[w] & !(T::one() << b);
            }
        }
    }

    /// Sets every bit in `row`.
    pub fn fill_row(&mut self, row: usize) {
        self.fill_rect(row, 0, row + 1, self.width);
    }

    /// Sets every bit in `col`.
    pub fn fill_col(&mut self, col: usize) {
        self.fill_rect(0, col, self.height, col + 1);
    }

    /// Clears all bits to `0`.
    #[inline]
    pub fn clear_all(&mut self) {
        for w in self.words.iter_mut() {
            *w = T::zero();
        }
    }

    /// True when `self` and `other` share at least one set bit.
    pub fn intersects(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(&a, &b)| !(a & b).is_zero())
    }

    /// True when every bit of `self` is also set in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(&a, &b)| (a & !b).is_zero())
    }

    /// Bits set in `self` but not in `other`.
    pub fn and_not(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (a, &b) in out.words.iter_mut().zip(other.words.iter()) {
            *a = *a & !b;
        }
        out
    }

    /// Iterator over the set bits of the mask in row-major order.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<'_, T> {
        SetBits { mask: self, idx: 0 }
    }
}

impl<T> fmt::Debug for BitMask<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitMask<{}x{}>:", self.height, self.width)?;
        fmt::Display::fmt(self, f)?;
        writeln!(f)
    }
}

impl<T> fmt::Display for BitMask<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for c in 0..self.width {
                let bit = if self.contains(r, c) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set bits of a mask.
#[derive(Clone, Copy)]
pub struct SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    mask: &'a BitMask<T>,
    idx: usize,
}

impl<T> Iterator for SetBits<'_, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let w = self.mask.width;
        while self.idx < self.mask.height * w {
            let idx = self.idx;
            self.idx += 1;
            if self.mask.contains(idx / w, idx % w) {
                return Some((idx / w, idx % w));
            }
        }
        None
    }
}

impl<T> BitOr for BitMask<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(mut self, rhs: Self) -> Self {
        self |= rhs;
        self
    }
}

impl<T> BitOrAssign for BitMask<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        for (a, b) in self.words.iter_mut().zip(rhs.words) {
            *a = *a | b;
        }
    }
}
