//! Deterministic enumeration of candidate strings.
//!
//! Counter `k` is read as a base-94 number over `len` positions. Position 0
//! is the least significant digit and sits immediately after the lane's
//! leading byte; higher positions follow to the right. Each position maps
//! through [`CHARSET`](crate::charset::CHARSET).
//!
//! Two views are provided and always agree:
//! - [`Odometer`] advances one step at a time, rippling carries position by
//!   position the way a mechanical counter does.
//! - [`candidate_at`] reconstructs the candidate for any counter directly.
//!
//! Counters at or above `94^len` wrap around; staying inside the space is the
//! caller's job.

use crate::candidate::Candidate;
use crate::charset::{symbol, CHARSET_LEN};

/// Maximum number of enumerated positions after the leading byte.
pub const MAX_ENUM_LEN: usize = 7;

/// Per-position carry-out produced by one [`Odometer::advance`].
pub type Carries = [bool; MAX_ENUM_LEN];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Odometer {
    len: usize,
    digits: [u8; MAX_ENUM_LEN],
}

impl Odometer {
    /// New odometer at counter 0 (every active position at charset index 0).
    ///
    /// Panics if `len > MAX_ENUM_LEN`.
    pub fn new(len: usize) -> Self {
        assert!(len <= MAX_ENUM_LEN, "odometer length {len} > {MAX_ENUM_LEN}");
        Self {
            len,
            digits: [0; MAX_ENUM_LEN],
        }
    }

    /// Odometer positioned at counter `k`.
    pub fn at(k: u64, len: usize) -> Self {
        let mut odo = Self::new(len);
        let mut rest = k;
        for digit in odo.digits.iter_mut().take(len) {
            *digit = (rest % CHARSET_LEN as u64) as u8;
            rest /= CHARSET_LEN as u64;
        }
        odo
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Active charset indices, least significant first.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    /// Step the counter by one.
    ///
    /// Position 0 always receives a carry-in. Position `i` only moves when
    /// position `i - 1` reports an overflow (wrapped from 93 back to 0).
    /// Inactive positions stay at zero and never overflow.
    pub fn advance(&mut self) -> Carries {
        let mut carries = [false; MAX_ENUM_LEN];
        let mut cin = true;
        for pos in 0..self.len {
            let next = self.digits[pos] as usize + cin as usize;
            let cout = next == CHARSET_LEN;
            self.digits[pos] = if cout { 0 } else { next as u8 };
            carries[pos] = cout;
            cin = cout;
        }
        carries
    }

    /// Write the symbols of the active positions into `out`.
    pub fn write_symbols(&self, out: &mut [u8]) {
        for (dst, &d) in out.iter_mut().zip(self.digits()) {
            *dst = symbol(d as usize);
        }
    }

    /// The enumerated tail (without leading byte) as charset symbols.
    pub fn symbols(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.len];
        self.write_symbols(&mut out);
        out
    }

    /// Full candidate: `lead` followed by the enumerated symbols.
    pub fn candidate(&self, lead: u8) -> Candidate {
        let mut tail = [0u8; MAX_ENUM_LEN];
        self.write_symbols(&mut tail);
        Candidate::with_lead(lead, &tail[..self.len])
    }
}

/// Size of the enumeration space for `len` positions (`94^len`).
pub fn space_size(len: usize) -> u64 {
    (CHARSET_LEN as u64).pow(len as u32)
}

/// Candidate for counter `k`, computed without stepping.
pub fn candidate_at(k: u64, len: usize, lead: u8) -> Candidate {
    Odometer::at(k, len).candidate(lead)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_zero_is_all_first_symbol() {
        let odo = Odometer::new(3);
        assert_eq!(odo.candidate(b'X').as_bytes(), b"Xaaa");
    }

    #[test]
    fn least_significant_position_is_next_to_lead() {
        assert_eq!(candidate_at(1, 3, b'X').as_bytes(), b"Xbaa");
        assert_eq!(candidate_at(93, 3, b'X').as_bytes(), b"X~aa");
        assert_eq!(candidate_at(94, 3, b'X').as_bytes(), b"Xaba");
    }

    #[test]
    fn carry_ripples_only_on_overflow() {
        let mut odo = Odometer::at(93, 3);
        let carries = odo.advance();
        assert_eq!(&carries[..3], &[true, false, false]);
        assert_eq!(odo.digits(), &[0, 1, 0]);

        let mut odo = Odometer::at(space_size(2) - 1, 3);
        let carries = odo.advance();
        assert_eq!(&carries[..3], &[true, true, false]);
        assert_eq!(odo.digits(), &[0, 0, 1]);
    }

    #[test]
    fn stepping_matches_random_access() {
        let mut odo = Odometer::new(2);
        for k in 0..space_size(2) {
            assert_eq!(odo, Odometer::at(k, 2), "counter {k}");
            odo.advance();
        }
        // the full space wraps back to zero
        assert_eq!(odo, Odometer::new(2));
    }

    #[test]
    fn zero_length_is_lead_only() {
        let mut odo = Odometer::new(0);
        assert_eq!(odo.candidate(b'z').as_bytes(), b"z");
        assert_eq!(odo.advance(), [false; MAX_ENUM_LEN]);
        assert_eq!(candidate_at(5, 0, b'z').as_bytes(), b"z");
    }
}
