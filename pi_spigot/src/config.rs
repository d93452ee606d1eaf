//! Run sizing: how many places, how many engine calls, how many cells.

use crate::SpigotError;

/// Engine calls a run may make past the requested precision by default.
/// Settling the last place costs one call per 9 that follows it.
pub const DEFAULT_GUARD_DIGITS: usize = 16;

/// How far a [`Spigot`](crate::Spigot) run goes.
///
/// `digits` counts decimal places *after* the point.  The engine is called
/// once for the leading 3 and once per place.  The last place is only final
/// once a predigit other than 9 has followed it, so a run keeps calling the
/// engine while that place is still held, up to `guard_digits` more times.
/// The array is sized for every one of those calls.  Guard digits are
/// computed but never emitted.
///
/// ```rust
/// use pi_spigot::SpigotConfig;
///
/// let cfg = SpigotConfig::new(20);
/// assert_eq!(cfg.iterations(), Some(37));
/// assert_eq!(cfg.array_len(), Some(124));
///
/// // No guards: the bare published procedure.
/// let bare = SpigotConfig::new(20).guard_digits(0);
/// assert_eq!(bare.iterations(), Some(21));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpigotConfig {
    pub digits:       usize,
    pub guard_digits: usize,
}

impl SpigotConfig {
    pub fn new(digits: usize) -> Self {
        SpigotConfig { digits, guard_digits: DEFAULT_GUARD_DIGITS }
    }

    /// Set how many engine calls may be spent settling the last place.
    pub fn guard_digits(mut self, guard: usize) -> Self {
        self.guard_digits = guard;
        self
    }

    /// Most calls to [`DigitArray::next_predigit`](crate::DigitArray::next_predigit)
    /// a run can make.
    pub fn iterations(&self) -> Option<usize> {
        self.digits.checked_add(1)?.checked_add(self.guard_digits)
    }

    /// Cells needed for `iterations()` correct predigits: `⌊10k/3⌋ + 1`.
    pub fn array_len(&self) -> Option<usize> {
        Some(self.iterations()?.checked_mul(10)? / 3 + 1)
    }

    pub(crate) fn sizes(&self) -> Result<(usize, usize), SpigotError> {
        let too_many = SpigotError::TooManyDigits { digits: self.digits };
        match (self.iterations(), self.array_len()) {
            (Some(calls), Some(len)) => Ok((calls, len)),
            _ => Err(too_many),
        }
    }
}

impl Default for SpigotConfig {
    fn default() -> Self { SpigotConfig::new(1000) }
}
