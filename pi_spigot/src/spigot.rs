//! Driving a run: engine → buffer → output.

use std::ops::ControlFlow;

use crate::config::SpigotConfig;
use crate::digit_array::{DigitArray, Word};
use crate::output::PiDigits;
use crate::predigit::PredigitBuffer;
use crate::SpigotError;

// ════════════════════════════════════════════════════════════════════════════
// Progress
// ════════════════════════════════════════════════════════════════════════════

/// Reported after each release of digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Digits released by this flush.
    pub released:  usize,
    /// Places after the point emitted so far.
    pub emitted:   usize,
    /// Places requested.
    pub requested: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.requested == 0 { return 100.0; }
        100.0 * self.emitted as f64 / self.requested as f64
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Spigot — one fixed-length run
// ════════════════════════════════════════════════════════════════════════════

/// A run of the spigot for a fixed number of places.
///
/// Owns its digit array, predigit buffer and output, so any number of runs
/// can live side by side.
///
/// ```rust
/// use pi_spigot::Spigot;
///
/// let pi = Spigot::new(10).unwrap().run();
/// assert_eq!(pi.as_str(), "3.1415926535");
/// ```
#[derive(Clone, Debug)]
pub struct Spigot<W: Word = u64> {
    config:     SpigotConfig,
    array:      DigitArray<W>,
    buffer:     PredigitBuffer,
    output:     PiDigits,
    calls_left: usize,
}

impl Spigot<u64> {
    /// `digits` places with default guards and 64-bit cells.
    pub fn new(digits: usize) -> Result<Self, SpigotError> {
        Spigot::from_config(SpigotConfig::new(digits))
    }
}

impl<W: Word> Spigot<W> {
    /// Size and allocate a run.  Every configuration error surfaces here.
    pub fn from_config(config: SpigotConfig) -> Result<Self, SpigotError> {
        let (calls, len) = config.sizes()?;
        Ok(Spigot {
            config,
            array:      DigitArray::sized(len)?,
            buffer:     PredigitBuffer::new(),
            output:     PiDigits::with_limit(config.digits)?,
            calls_left: calls,
        })
    }

    pub fn config(&self) -> &SpigotConfig { &self.config }

    pub fn array(&self) -> &DigitArray<W> { &self.array }

    pub fn buffer(&self) -> &PredigitBuffer { &self.buffer }

    /// Digits released so far.
    pub fn output(&self) -> &PiDigits { &self.output }

    /// Engine calls the run may still make.
    pub fn remaining(&self) -> usize { self.calls_left }

    /// Every requested place has been released and none can change.
    pub fn is_settled(&self) -> bool {
        self.output.is_complete() && self.output.is_settled()
    }

    /// One engine call, its predigit fed through the buffer.  `None` once
    /// the last requested place is released, or once the calls run out
    /// with it still held.
    pub fn step(&mut self) -> Option<Progress> {
        if self.calls_left == 0 || self.output.is_complete() {
            return None;
        }
        self.calls_left -= 1;
        let predigit = self.array.next_predigit();
        let released = self.buffer.push(predigit, &mut self.output);
        Some(self.progress(released))
    }

    /// Stop making engine calls and release whatever the buffer holds.
    /// Held digits that land inside the limit are marked unsettled.
    fn flush(&mut self) -> Progress {
        self.calls_left = 0;
        if !self.buffer.held().is_empty() && !self.output.is_complete() {
            self.output.mark_unsettled();
        }
        let released = self.buffer.finish(&mut self.output);
        self.progress(released)
    }

    /// End the run where it stands: flush the buffer and hand back the
    /// digits.  For a run stepped by hand.  Stopping before [`step`](Self::step)
    /// returns `None` leaves the flushed tail unsettled.
    pub fn finish(mut self) -> PiDigits {
        self.flush();
        self.output
    }

    /// Run to completion.
    pub fn run(self) -> PiDigits {
        self.run_with(|_| ControlFlow::Continue(()))
    }

    /// Run to completion, calling `on_release` whenever digits are
    /// released.  Returning `ControlFlow::Break` stops early; held digits
    /// are still flushed, but a carry that never arrived may have been owed
    /// to them, so only [`PiDigits::settled_places`] are final.
    pub fn run_with<F>(mut self, mut on_release: F) -> PiDigits
    where
        F: FnMut(Progress) -> ControlFlow<()>,
    {
        while let Some(p) = self.step() {
            if p.released > 0 && on_release(p).is_break() {
                break;
            }
        }
        let last = self.flush();
        if last.released > 0 {
            let _ = on_release(last);
        }
        self.output
    }

    fn progress(&self, released: usize) -> Progress {
        Progress {
            released,
            emitted:   self.output.fractional_len(),
            requested: self.config.digits,
        }
    }

    /// The run as a lazy digit stream.
    pub fn into_stream(self) -> PiStream<W> {
        PiStream { spigot: self, cursor: 0 }
    }
}

impl<W: Word> IntoIterator for Spigot<W> {
    type Item = u8;
    type IntoIter = PiStream<W>;

    fn into_iter(self) -> PiStream<W> { self.into_stream() }
}

// ════════════════════════════════════════════════════════════════════════════
// PiStream — finalized digits one at a time
// ════════════════════════════════════════════════════════════════════════════

/// Finalized digits of a fixed run, yielded as soon as they are released:
/// the leading 3, then the requested places, then nothing.
///
/// ```rust
/// use pi_spigot::PiStream;
///
/// let v: Vec<u8> = PiStream::new(6).unwrap().collect();
/// assert_eq!(v, [3, 1, 4, 1, 5, 9, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct PiStream<W: Word = u64> {
    spigot: Spigot<W>,
    /// Index of the next digit to yield, point not counted.
    cursor: usize,
}

impl PiStream<u64> {
    pub fn new(digits: usize) -> Result<Self, SpigotError> {
        Ok(Spigot::new(digits)?.into_stream())
    }
}

impl<W: Word> PiStream<W> {
    /// Digits yielded so far.
    pub fn position(&self) -> usize { self.cursor }

    /// Stop early: no more engine calls.  Digits already released are
    /// still yielded, followed by the held ones as they stand, which may
    /// be short of a carry.
    pub fn cancel(&mut self) {
        self.spigot.flush();
    }

    /// Stop and take the digit string as it stands.
    pub fn into_digits(self) -> PiDigits {
        self.spigot.finish()
    }
}

impl<W: Word> Iterator for PiStream<W> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        loop {
            if let Some(d) = self.spigot.output.digit(self.cursor) {
                self.cursor += 1;
                return Some(d);
            }
            if self.spigot.step().is_none() && self.spigot.flush().released == 0 {
                return None;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.spigot.config.digits + 1;
        (0, Some(total.saturating_sub(self.cursor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PI_100: &str = "3.\
        1415926535897932384626433832795028841971693993751058209749445923\
        078164062862089986280348253421170679";

    // ── reference vectors ─────────────────────────────────────────────────
    #[test]
    fn twenty_places() {
        let pi = Spigot::new(20).unwrap().run();
        assert_eq!(pi.as_str(), "3.14159265358979323846");
        assert_eq!(pi.fractional_len(), 20);
        assert!(pi.is_complete());
    }

    #[test]
    fn hundred_places() {
        assert_eq!(Spigot::new(100).unwrap().run().as_str(), PI_100);
    }

    #[test]
    fn every_prefix_of_a_hundred() {
        for n in 0..=100 {
            let pi = Spigot::new(n).unwrap().run();
            assert_eq!(pi.as_str(), &PI_100[..n + 2], "n = {}", n);
        }
    }

    #[test]
    fn guards_are_discarded() {
        // place 21 is a 2: one guard call settles place 20, then it is dropped
        let pi = Spigot::new(20).unwrap().run();
        assert_eq!(pi.discarded(), 1);
        assert!(pi.is_settled());
    }

    #[test]
    fn bare_procedure_without_guards() {
        let cfg = SpigotConfig::new(20).guard_digits(0);
        let pi = Spigot::<u64>::from_config(cfg).unwrap().run();
        assert_eq!(pi.as_str(), "3.14159265358979323846");
        assert_eq!(pi.discarded(), 0);
        // right, but only by luck: place 20 was never confirmed
        assert!(!pi.is_settled());
        assert_eq!(pi.settled_places(), 19);
    }

    // ── settling the last place ───────────────────────────────────────────
    // Places 854.. come out of the engine as 0, 9, 9, 9, 10.
    #[test]
    fn nines_after_the_last_place_are_waited_out() {
        let mut s = Spigot::new(854).unwrap();
        while s.step().is_some() {}
        assert!(s.is_settled());
        assert!(s.array().calls() > 857);
        let pi = s.finish();
        let longer = Spigot::new(870).unwrap().run();
        assert_eq!(pi.as_str(), &longer.as_str()[..856]);
        assert!(pi.as_str().ends_with('1'));
    }

    #[test]
    fn too_few_guards_leave_the_tail_unsettled() {
        let cfg = SpigotConfig::new(854).guard_digits(2);
        let pi = Spigot::<u64>::from_config(cfg).unwrap().run();
        assert!(!pi.is_settled());
        assert_eq!(pi.settled_places(), 853);
        let settled = Spigot::new(854).unwrap().run();
        assert_eq!(&pi.as_str()[..855], &settled.as_str()[..855]);
        assert_ne!(pi, settled);
    }

    #[test]
    fn deterministic() {
        let a = Spigot::new(300).unwrap().run();
        let b = Spigot::new(300).unwrap().run();
        assert_eq!(a, b);
    }

    #[test]
    fn independent_runs_interleave() {
        let mut short = Spigot::new(5).unwrap();
        let mut long = Spigot::new(50).unwrap();
        while short.step().is_some() {
            long.step();
        }
        assert_eq!(short.finish().as_str(), "3.14159");
        assert!(long.remaining() > 0);
        assert!(PI_100.starts_with(long.output().as_str()));
    }

    // ── word widths ───────────────────────────────────────────────────────
    #[test]
    fn word_widths_agree() {
        let cfg = SpigotConfig::new(400);
        let wide = Spigot::<u64>::from_config(cfg).unwrap().run();
        let narrow = Spigot::<u32>::from_config(cfg).unwrap().run();
        let tiny = Spigot::<u16>::from_config(cfg).unwrap().run();
        assert_eq!(wide, narrow);
        assert_eq!(wide, tiny);
    }

    #[test]
    fn u16_rejects_large_runs() {
        let err = Spigot::<u16>::from_config(SpigotConfig::new(500)).unwrap_err();
        assert!(matches!(err, SpigotError::WidthExceeded { bits: 16, .. }));
    }

    #[test]
    fn absurd_runs_rejected_before_allocating() {
        assert!(matches!(
            Spigot::new(usize::MAX),
            Err(SpigotError::TooManyDigits { .. })
        ));
        assert!(Spigot::new(usize::MAX / 11).is_err());
    }

    // ── stepping ──────────────────────────────────────────────────────────
    #[test]
    fn step_count_matches_config() {
        let mut s = Spigot::new(20).unwrap();
        let mut calls = 0;
        while s.step().is_some() {
            calls += 1;
        }
        // the 22nd predigit (place 21) is not a 9, so place 20 is final
        assert_eq!(calls, 22);
        assert_eq!(s.array().calls(), 22);
        assert!(s.is_settled());
        assert_eq!(s.remaining(), 37 - 22);
        assert_eq!(s.step(), None);
    }

    #[test]
    fn termination_flush_surfaces_held_digits() {
        let cfg = SpigotConfig::new(20).guard_digits(0);
        let mut s = Spigot::<u64>::from_config(cfg).unwrap();
        while s.step().is_some() {}
        assert!(!s.buffer().held().is_empty());
        assert!(s.output().fractional_len() < 20);
        let pi = s.finish();
        assert_eq!(pi.fractional_len(), 20);
        assert_eq!(pi.as_str(), "3.14159265358979323846");
    }

    #[test]
    fn finish_early_settles_only_what_was_released() {
        let mut s = Spigot::new(100).unwrap();
        for _ in 0..30 {
            s.step();
        }
        let released = s.output().fractional_len();
        assert!(!s.buffer().held().is_empty());
        let pi = s.finish();
        assert!(!pi.is_settled());
        assert_eq!(pi.settled_places(), released);
        assert_eq!(pi.fractional_len(), 29);
        assert!(PI_100.starts_with(&pi.as_str()[..released + 2]));
    }

    // ── progress and cancellation ─────────────────────────────────────────
    #[test]
    fn progress_reaches_requested() {
        let mut seen = Vec::new();
        let pi = Spigot::new(50).unwrap().run_with(|p| {
            seen.push(p);
            ControlFlow::Continue(())
        });
        let last = seen.last().copied().unwrap();
        assert_eq!(last.emitted, 50);
        assert_eq!(last.requested, 50);
        assert_eq!(last.percent(), 100.0);
        assert!(seen.windows(2).all(|w| w[0].emitted <= w[1].emitted));
        assert!(seen.iter().all(|p| p.released > 0));
        assert_eq!(pi.fractional_len(), 50);
    }

    #[test]
    fn break_keeps_settled_prefix() {
        let pi = Spigot::new(100).unwrap().run_with(|p| {
            if p.emitted >= 10 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        });
        assert!(pi.settled_places() >= 10);
        assert!(pi.fractional_len() < 100);
        assert!(PI_100.starts_with(&pi.as_str()[..pi.settled_places() + 2]));
    }

    #[test]
    fn percent_of_zero_places() {
        let p = Progress { released: 1, emitted: 0, requested: 0 };
        assert_eq!(p.percent(), 100.0);
    }

    // ── stream ────────────────────────────────────────────────────────────
    #[test]
    fn stream_matches_run() {
        let digits: Vec<u8> = PiStream::new(100).unwrap().collect();
        assert_eq!(digits, Spigot::new(100).unwrap().run().digits());
        assert_eq!(digits.len(), 101);
    }

    #[test]
    fn stream_of_zero_places() {
        let digits: Vec<u8> = Spigot::new(0).unwrap().into_iter().collect();
        assert_eq!(digits, [3]);
    }

    #[test]
    fn stream_take_and_skip() {
        let frac: Vec<u8> = PiStream::new(30).unwrap().skip(1).take(5).collect();
        assert_eq!(frac, [1, 4, 1, 5, 9]);
    }

    #[test]
    fn stream_cancel_keeps_prefix() {
        let mut s = PiStream::new(100).unwrap();
        let mut got: Vec<u8> = s.by_ref().take(10).collect();
        assert_eq!(s.position(), 10);
        s.cancel();
        got.extend(s.by_ref());
        assert_eq!(s.next(), None);
        assert!(got.len() >= 10);
        assert!(got.len() < 101);

        let pi = s.into_digits();
        assert_eq!(got, pi.digits());
        let settled = pi.settled_places() + 1;
        let expected = Spigot::new(100).unwrap().run().digits();
        assert_eq!(&got[..settled], &expected[..settled]);
    }

    #[test]
    fn stream_into_digits() {
        let mut s = PiStream::new(40).unwrap();
        assert_eq!(s.by_ref().take(3).collect::<Vec<_>>(), [3, 1, 4]);
        let pi = s.into_digits();
        assert!(pi.settled_places() >= 2);
        assert!(PI_100.starts_with(&pi.as_str()[..pi.settled_places() + 2]));
    }

    #[test]
    fn stream_size_hint_shrinks() {
        let mut s = PiStream::new(5).unwrap();
        assert_eq!(s.size_hint(), (0, Some(6)));
        s.next();
        assert_eq!(s.size_hint(), (0, Some(5)));
    }
}
