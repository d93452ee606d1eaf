//! The mixed-radix digit array.
//!
//! π is written as
//!
//! ```text
//! π = 2 + 1/3 (2 + 2/5 (2 + 3/7 (2 + 4/9 (2 + …))))
//! ```
//!
//! i.e. a number whose cell `i` carries the weight `i/(2i+1)` and may hold
//! `0 ..= 2i`.  Multiplying every cell by 10 and carrying right to left
//! pushes exactly one decimal predigit out of cell 0.

use std::fmt::Debug;

use num_traits::{PrimInt, Unsigned};

use crate::SpigotError;

/// Peak intermediate value per cell of a normalisation pass.
///
/// Before reduction cell `i` holds `10·r + q·(i+1)` with `r ≤ 2i` and the
/// incoming quotient `q ≤ 19`, which stays below `20·(2i+1)`; so every
/// value in an `L`-cell pass is below `40·L`.
const PEAK_PER_CELL: usize = 40;

/// Unsigned machine word usable as a cell.
pub trait Word: PrimInt + Unsigned + From<u8> + Debug {}

impl<T: PrimInt + Unsigned + From<u8> + Debug> Word for T {}

fn small<W: Word>(v: u8) -> W {
    <W as From<u8>>::from(v)
}

// ════════════════════════════════════════════════════════════════════════════
// DigitArray
// ════════════════════════════════════════════════════════════════════════════

/// Fixed-length array of mixed-radix cells, all starting at 2.
///
/// ```rust
/// use pi_spigot::DigitArray;
///
/// let mut a = DigitArray::new(14).unwrap();
/// let first: Vec<u8> = (0..4).map(|_| a.next_predigit()).collect();
/// assert_eq!(first, [3, 1, 4, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct DigitArray<W: Word = u64> {
    cells: Vec<W>,
    /// Index of the last cell, as a word.
    top:   W,
    calls: usize,
}

impl DigitArray<u64> {
    /// An `len`-cell array of 64-bit words.
    pub fn new(len: usize) -> Result<Self, SpigotError> {
        DigitArray::sized(len)
    }
}

impl<W: Word> DigitArray<W> {
    /// An `len`-cell array of `W` words.
    ///
    /// Fails with [`SpigotError::WidthExceeded`] if a normalisation pass
    /// could overflow `W`, and with [`SpigotError::OutOfMemory`] if the
    /// cells cannot be allocated.
    pub fn sized(len: usize) -> Result<Self, SpigotError> {
        let len = len.max(1);
        let width = SpigotError::WidthExceeded { len, bits: W::zero().count_zeros() };
        let fits = len
            .checked_mul(PEAK_PER_CELL)
            .and_then(num_traits::cast::<usize, W>)
            .is_some();
        if !fits {
            return Err(width);
        }
        let top = num_traits::cast::<usize, W>(len - 1).ok_or(width)?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|source| SpigotError::OutOfMemory { len, source })?;
        cells.resize(len, small(2));

        Ok(DigitArray { cells, top, calls: 0 })
    }

    /// Scale by 10, renormalise, and pull the next predigit (0–10) out of
    /// cell 0.
    pub fn next_predigit(&mut self) -> u8 {
        let ten: W = small(10);
        let two: W = small(2);

        // Scaling is folded into the scan: a cell is multiplied by 10
        // before the carry from its right neighbour lands on it.
        let mut i = self.top;
        let mut radix = i + i + W::one();
        let mut carry = W::zero();
        for cell in self.cells[1..].iter_mut().rev() {
            let x = *cell * ten + carry;
            *cell = x % radix;
            carry = x / radix * i;
            i = i - W::one();
            radix = radix - two;
        }

        let head = self.cells[0] * ten + carry;
        self.cells[0] = head % ten;
        self.calls += 1;

        match (head / ten).to_u8() {
            Some(q) if q <= 10 => q,
            _ => panic!("predigit {:?} out of range at call {}", head / ten, self.calls),
        }
    }

    pub fn len(&self) -> usize { self.cells.len() }

    /// Never true: an array has at least one cell.
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    pub fn cells(&self) -> &[W] { &self.cells }

    /// Number of predigits extracted so far.
    pub fn calls(&self) -> usize { self.calls }

    /// Whether every cell `i ≥ 1` is below its radix `2i+1`.
    pub fn is_regular(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .skip(1)
            .all(|(i, &c)| c.to_usize().is_some_and(|c| c < 2 * i + 1))
    }
}
