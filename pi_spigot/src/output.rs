//! The finished digit string.

use std::fmt;
use std::io::{self, Write};

use crate::predigit::DigitSink;
use crate::SpigotError;

/// π as text: the leading digit, one `.`, then up to `limit` places.
///
/// Digits are only ever appended.  Once `limit` places are in, further
/// digits (a run's guard digits) are counted in [`discarded`](Self::discarded)
/// and dropped.
///
/// Places released by a forced flush were never confirmed by a later
/// predigit; [`settled_places`](Self::settled_places) marks where they start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PiDigits {
    text:      String,
    limit:     usize,
    discarded: usize,
    settled:   Option<usize>,
}

impl PiDigits {
    /// Empty sequence with room for `limit` places.
    pub fn with_limit(limit: usize) -> Result<Self, SpigotError> {
        let len = limit.checked_add(2).ok_or(SpigotError::TooManyDigits { digits: limit })?;
        let mut text = String::new();
        text.try_reserve_exact(len)
            .map_err(|source| SpigotError::OutOfMemory { len, source })?;
        Ok(PiDigits { text, limit, discarded: 0, settled: None })
    }

    pub fn as_str(&self) -> &str { &self.text }

    pub fn into_string(self) -> String { self.text }

    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    /// Places after the point emitted so far.
    pub fn fractional_len(&self) -> usize { self.text.len().saturating_sub(2) }

    /// Places requested.
    pub fn limit(&self) -> usize { self.limit }

    /// Digits dropped after the limit was reached.
    pub fn discarded(&self) -> usize { self.discarded }

    pub fn is_complete(&self) -> bool {
        !self.text.is_empty() && self.fractional_len() == self.limit
    }

    /// Leading places that no later carry can change.
    pub fn settled_places(&self) -> usize {
        self.settled.unwrap_or_else(|| self.fractional_len())
    }

    /// No place came out of a forced flush.
    pub fn is_settled(&self) -> bool { self.settled.is_none() }

    /// Everything appended from here on is unconfirmed.
    pub(crate) fn mark_unsettled(&mut self) {
        if self.settled.is_none() {
            self.settled = Some(self.fractional_len());
        }
    }

    /// The digit before the point.
    pub fn integer_digit(&self) -> Option<u8> {
        self.text.bytes().next().map(|b| b - b'0')
    }

    /// The `k`-th digit (0 is the digit before the point).
    pub fn digit(&self, k: usize) -> Option<u8> {
        let at = if k == 0 { 0 } else { k + 1 };
        self.text.as_bytes().get(at).map(|b| b - b'0')
    }

    /// Places after the point, as values 0–9.
    pub fn fractional(&self) -> impl Iterator<Item = u8> + '_ {
        self.text.bytes().skip(2).map(|b| b - b'0')
    }

    /// Every digit, point omitted.
    pub fn digits(&self) -> Vec<u8> {
        self.integer_digit().into_iter().chain(self.fractional()).collect()
    }

    /// Write the sequence followed by a newline, breaking the fractional
    /// part every `wrap` places (no breaks when `wrap == 0`).  Continuation
    /// lines are indented to line up under the first place.
    pub fn write_wrapped<W: Write>(&self, out: &mut W, wrap: usize) -> io::Result<()> {
        let head = self.text.get(..2).unwrap_or(&self.text);
        let tail = self.text.get(2..).unwrap_or("");
        if wrap == 0 || tail.len() <= wrap {
            return writeln!(out, "{}", self.text);
        }

        let indent = " ".repeat(head.len());
        for (i, chunk) in tail.as_bytes().chunks(wrap).enumerate() {
            out.write_all(if i == 0 { head.as_bytes() } else { indent.as_bytes() })?;
            out.write_all(chunk)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl DigitSink for PiDigits {
    fn accept(&mut self, digit: u8) {
        debug_assert!(digit <= 9);
        let c = char::from(b'0' + digit);
        if self.text.is_empty() {
            self.text.push(c);
            self.text.push('.');
        } else if self.fractional_len() < self.limit {
            self.text.push(c);
        } else {
            self.discarded += 1;
        }
    }
}

impl fmt::Display for PiDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for PiDigits {
    fn as_ref(&self) -> &str { &self.text }
}
