//! Fixed-capacity candidate strings with an explicit length tag.

use std::fmt;

use crate::SweepError;

/// Longest candidate (enumerated or wordlist) that fits a single block.
pub const MAX_CANDIDATE_LEN: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    bytes: [u8; MAX_CANDIDATE_LEN],
    len: u8,
}

impl Candidate {
    /// Build a candidate from raw bytes.
    ///
    /// Embedded NUL bytes are kept; the length is carried explicitly rather
    /// than inferred from trailing zeros.
    pub fn new(data: &[u8]) -> Result<Self, SweepError> {
        if data.len() > MAX_CANDIDATE_LEN {
            return Err(SweepError::Config(format!(
                "candidate of {} bytes exceeds the {MAX_CANDIDATE_LEN}-byte limit",
                data.len()
            )));
        }
        let mut bytes = [0u8; MAX_CANDIDATE_LEN];
        bytes[..data.len()].copy_from_slice(data);
        Ok(Self {
            bytes,
            len: data.len() as u8,
        })
    }

    /// Candidate made of a leading byte followed by `tail`.
    ///
    /// `tail` must be at most `MAX_CANDIDATE_LEN - 1` bytes.
    pub(crate) fn with_lead(lead: u8, tail: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_CANDIDATE_LEN];
        bytes[0] = lead;
        bytes[1..=tail.len()].copy_from_slice(tail);
        Self {
            bytes,
            len: tail.len() as u8 + 1,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        String::from_utf8_lossy(self.as_bytes()).fmt(f)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Candidate({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_embedded_nul_and_length() {
        let c = Candidate::new(b"a\0b\0").unwrap();
        assert_eq!(c.len(), 4);
        assert_eq!(c.as_bytes(), b"a\0b\0");
    }

    #[test]
    fn full_slot_is_not_ambiguous() {
        let word = [0u8; MAX_CANDIDATE_LEN];
        let c = Candidate::new(&word).unwrap();
        assert_eq!(c.len(), MAX_CANDIDATE_LEN);
        assert!(Candidate::new(&[b'x'; MAX_CANDIDATE_LEN + 1]).is_err());
    }

    #[test]
    fn lead_is_prepended() {
        let c = Candidate::with_lead(b'Q', b"abc");
        assert_eq!(c.as_bytes(), b"Qabc");
        assert_eq!(c.to_string(), "Qabc");
    }
}
