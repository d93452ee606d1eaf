//! Predigit buffering.
//!
//! A predigit of 9 might still become 0 (with a carry into the digit before
//! it) if a 10 turns up later, so 9s are never released on arrival.  The
//! buffer holds the last settled-looking predigit plus every 9 after it,
//! and releases the whole run as soon as a non-9 decides its fate.

// ════════════════════════════════════════════════════════════════════════════
// DigitSink — where released digits go
// ════════════════════════════════════════════════════════════════════════════

/// Receiver of finalized digits, in order.
pub trait DigitSink {
    fn accept(&mut self, digit: u8);
}

impl DigitSink for Vec<u8> {
    fn accept(&mut self, digit: u8) { self.push(digit) }
}

impl<S: DigitSink + ?Sized> DigitSink for &mut S {
    fn accept(&mut self, digit: u8) { (**self).accept(digit) }
}

// ════════════════════════════════════════════════════════════════════════════
// PredigitBuffer
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferState {
    Empty,
    /// Number of predigits held.
    Holding(usize),
}

/// Queue of held predigits.
///
/// ```rust
/// use pi_spigot::PredigitBuffer;
///
/// let mut buf = PredigitBuffer::new();
/// let mut out = Vec::new();
/// for p in [3, 1, 4, 9, 9, 10, 2] {
///     buf.push(p, &mut out);
/// }
/// buf.finish(&mut out);
/// // the 10 rolls 4,9,9 over to 5,0,0
/// assert_eq!(out, [3, 1, 5, 0, 0, 0, 2]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredigitBuffer {
    held: Vec<u8>,
}

impl PredigitBuffer {
    pub fn new() -> Self { PredigitBuffer::default() }

    pub fn state(&self) -> BufferState {
        match self.held.len() {
            0 => BufferState::Empty,
            n => BufferState::Holding(n),
        }
    }

    /// Held predigits, oldest first.
    pub fn held(&self) -> &[u8] { &self.held }

    /// Feed one predigit (0–10).  Returns how many digits were released
    /// into `sink`.
    ///
    /// # Panics
    ///
    /// If `predigit > 10`, or if it is 10 while nothing is held.
    pub fn push<S: DigitSink + ?Sized>(&mut self, predigit: u8, sink: &mut S) -> usize {
        assert!(predigit <= 10, "predigit must be 0–10, got {}", predigit);

        if predigit == 9 {
            self.held.push(9);
            return 0;
        }

        let mut incoming = predigit;
        if incoming == 10 {
            assert!(!self.held.is_empty(), "carry predigit with nothing held");
            for d in &mut self.held {
                *d = (*d + 1) % 10;
            }
            incoming = 0;
        }

        let released = self.release(sink);
        self.held.push(incoming);
        released
    }

    /// Forced flush at end of stream: release everything held as-is.
    pub fn finish<S: DigitSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        self.release(sink)
    }

    fn release<S: DigitSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let n = self.held.len();
        for d in self.held.drain(..) {
            sink.accept(d);
        }
        n
    }
}
