//! # pi_spigot
//!
//! Decimal digits of π by the Rabinowitz–Wagon spigot algorithm
//! ("A Spigot Algorithm for the Digits of π", *Amer. Math. Monthly* 102,
//! 1995).
//!
//! π is held as a mixed-radix number whose position `i` has radix `2i+1`.
//! Multiplying that number by 10 and renormalising it pushes one decimal
//! *predigit* out of the leftmost cell per call.  Predigits are provisional:
//! a later carry may still bump a run of them, so they pass through a
//! [`PredigitBuffer`] that only releases digits once they can no longer
//! change.
//!
//! ## Layers
//!
//! | Type | Role |
//! |---|---|
//! | [`DigitArray`] | the mixed-radix cells; one predigit per call |
//! | [`PredigitBuffer`] | holds ambiguous predigits, resolves 9/10 runs |
//! | [`PiDigits`] | the final `3.1415…` string |
//! | [`Spigot`] | drives the two for a fixed number of iterations |
//! | [`PiStream`] | the same run as a lazy `Iterator<Item = u8>` |
//!
//! ## Quick start
//!
//! ```rust
//! use pi_spigot::pi_digits;
//!
//! let pi = pi_digits(20).unwrap();
//! assert_eq!(pi.as_str(), "3.14159265358979323846");
//! ```
//!
//! Runs are finite and fixed up front: asking for `n` places sizes the
//! array for that precision plus a few guard calls, and the run cannot be
//! resumed past it.

pub mod config;
pub mod digit_array;
pub mod output;
pub mod predigit;
pub mod spigot;

use std::collections::TryReserveError;

pub use config::SpigotConfig;
pub use digit_array::{DigitArray, Word};
pub use output::PiDigits;
pub use predigit::{BufferState, DigitSink, PredigitBuffer};
pub use spigot::{PiStream, Progress, Spigot};

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

/// Run errors.  All but [`Unsettled`](Self::Unsettled) are raised while a
/// run is being set up, before the first predigit is computed.
#[derive(Debug, thiserror::Error)]
pub enum SpigotError {
    #[error("{digits} digits is too many to size a digit array")]
    TooManyDigits { digits: usize },
    #[error("{bits}-bit words cannot hold the carries of a {len}-cell digit array")]
    WidthExceeded { len: usize, bits: u32 },
    #[error("cannot allocate {len} cells: {source}")]
    OutOfMemory {
        len: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("place {place} was still waiting on a carry after {guard} guard calls")]
    Unsettled { place: usize, guard: usize },
}

// ════════════════════════════════════════════════════════════════════════════
// Convenience
// ════════════════════════════════════════════════════════════════════════════

/// Compute π to `digits` decimal places with the default configuration
/// and 64-bit cells.  Fails rather than return a last place that the guard
/// calls could not confirm.
pub fn pi_digits(digits: usize) -> Result<PiDigits, SpigotError> {
    let spigot = Spigot::new(digits)?;
    let guard = spigot.config().guard_digits;
    let pi = spigot.run();
    if !pi.is_settled() {
        return Err(SpigotError::Unsettled { place: pi.settled_places() + 1, guard });
    }
    Ok(pi)
}

/// Render a digit value (0–9) as its ASCII character.  Values outside
/// that range render as `'?'`.
pub fn digit_char(d: u8) -> char {
    char::from_digit(d as u32, 10).unwrap_or('?')
}
