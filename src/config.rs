//! Run parameters and the validation that guards the compute core.
//!
//! The core itself never checks its inputs. Everything a caller can get
//! wrong (lengths, salt size, golden width, index space) is rejected here
//! before a run starts.

use serde::Serialize;

use crate::block::fits_single_block;
use crate::candidate::MAX_CANDIDATE_LEN;
use crate::digest::PackedDigest;
use crate::odometer::{space_size, MAX_ENUM_LEN};
use crate::variant::HashVariant;
use crate::SweepError;

/// The salt always occupies this many bytes of the logical message.
pub const SALT_BYTES: usize = 8;

/// Width of match indices; the all-ones value of this width means "not found".
pub const INDEX_BITS: u32 = 48;

/// Depth of each bounded lane channel.
pub const DEFAULT_CHANNEL_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Emit every digest, ordered by `(step, lane)`.
    Enumerate,
    /// Report the lowest index whose digest equals the golden digest.
    Search,
}

impl TryFrom<u8> for Mode {
    type Error = SweepError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Mode::Enumerate),
            1 => Ok(Mode::Search),
            other => Err(SweepError::Config(format!("mode must be 0 or 1, got {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaltPosition {
    /// `salt || message`
    #[default]
    Front,
    /// `message || salt`
    Back,
}

impl TryFrom<u8> for SaltPosition {
    type Error = SweepError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(SaltPosition::Front),
            1 => Ok(SaltPosition::Back),
            other => Err(SweepError::Config(format!(
                "salt position must be 0 (front) or 1 (back), got {other}"
            ))),
        }
    }
}

/// Salt shared read-only by every lane of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaltConfig {
    /// Salt bytes, zero padded on the right to [`SALT_BYTES`].
    pub bytes: [u8; SALT_BYTES],
    pub position: SaltPosition,
    pub enabled: bool,
}

impl SaltConfig {
    /// No salt.
    pub fn none() -> Self {
        Self::default()
    }

    /// Enabled salt from up to eight bytes; shorter salts are zero padded.
    pub fn new(salt: &[u8], position: SaltPosition) -> Result<Self, SweepError> {
        if salt.len() > SALT_BYTES {
            return Err(SweepError::Config(format!(
                "salt is {} bytes, at most {SALT_BYTES} allowed",
                salt.len()
            )));
        }
        let mut bytes = [0u8; SALT_BYTES];
        bytes[..salt.len()].copy_from_slice(salt);
        Ok(Self {
            bytes,
            position,
            enabled: true,
        })
    }

    /// Bytes the salt adds to the logical message.
    pub fn extra_len(&self) -> usize {
        if self.enabled {
            SALT_BYTES
        } else {
            0
        }
    }

    /// Offset of the first message byte inside the block.
    pub fn message_offset(&self) -> usize {
        if self.enabled && self.position == SaltPosition::Front {
            SALT_BYTES
        } else {
            0
        }
    }
}

/// How lanes are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Executor {
    /// One OS thread per lane plus a feeder, joined by bounded channels.
    #[default]
    Threaded,
    /// Everything on the calling thread; same results, used as a reference.
    Sequential,
}

/// Parameters of the enumeration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BruteSource {
    /// Number of enumerated positions after the leading byte (0..=7).
    pub len: usize,
    /// One distinguishing leading byte per lane; its length is the lane count.
    pub leads: Vec<u8>,
}

impl BruteSource {
    pub fn lanes(&self) -> usize {
        self.leads.len()
    }
}

/// Everything a run needs besides its candidate source.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of steps; each step feeds one input to every lane.
    pub size: u64,
    pub mode: Mode,
    pub golden: Option<PackedDigest>,
    pub salt: SaltConfig,
    pub channel_depth: usize,
    pub executor: Executor,
}

impl RunConfig {
    pub fn enumerate(size: u64) -> Self {
        Self {
            size,
            mode: Mode::Enumerate,
            golden: None,
            salt: SaltConfig::none(),
            channel_depth: DEFAULT_CHANNEL_DEPTH,
            executor: Executor::Threaded,
        }
    }

    pub fn search(size: u64, golden: PackedDigest) -> Self {
        Self {
            mode: Mode::Search,
            golden: Some(golden),
            ..Self::enumerate(size)
        }
    }

    pub fn with_salt(mut self, salt: SaltConfig) -> Self {
        self.salt = salt;
        self
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    /// Check the settings shared by both sources.
    pub fn validate<V: HashVariant>(&self, lanes: usize) -> Result<(), SweepError> {
        if lanes == 0 {
            return Err(SweepError::Config("at least one lane is required".into()));
        }
        if self.channel_depth == 0 {
            return Err(SweepError::Config("channel depth must be non-zero".into()));
        }
        let fits = self
            .size
            .checked_mul(lanes as u64)
            .is_some_and(|total| total < not_found_index());
        if !fits {
            return Err(SweepError::Config(format!(
                "{} steps x {lanes} lanes does not fit a {INDEX_BITS}-bit index",
                self.size
            )));
        }
        match (self.mode, &self.golden) {
            (Mode::Search, None) => {
                return Err(SweepError::Config("search mode requires a golden digest".into()))
            }
            (Mode::Search, Some(g)) if !g.is_valid_for::<V>() => {
                return Err(SweepError::Config(format!(
                    "golden digest has bits set beyond the {}-byte {} digest",
                    V::digest_bytes(),
                    V::NAME
                )))
            }
            _ => {}
        }
        Ok(())
    }

    /// Validation for enumeration runs.
    pub fn validate_brute<V: HashVariant>(&self, source: &BruteSource) -> Result<(), SweepError> {
        if source.len > MAX_ENUM_LEN {
            return Err(SweepError::Config(format!(
                "enumeration length must be 0-{MAX_ENUM_LEN}, got {}",
                source.len
            )));
        }
        if self.size > space_size(source.len) {
            return Err(SweepError::Config(format!(
                "{} steps exceed the {} candidates of length {}",
                self.size,
                space_size(source.len),
                source.len
            )));
        }
        self.validate::<V>(source.lanes())?;
        if !fits_single_block::<V>(source.len + 1, &self.salt) {
            return Err(SweepError::Internal("enumerated candidate overflows block".into()));
        }
        Ok(())
    }

    /// Validation for wordlist runs over `words` with `lanes` lanes.
    pub fn validate_wordlist<V: HashVariant>(
        &self,
        longest_word: usize,
        lanes: usize,
    ) -> Result<(), SweepError> {
        if longest_word > MAX_CANDIDATE_LEN {
            return Err(SweepError::Config(format!(
                "word of {longest_word} bytes exceeds the {MAX_CANDIDATE_LEN}-byte limit"
            )));
        }
        self.validate::<V>(lanes)?;
        if !fits_single_block::<V>(longest_word, &self.salt) {
            return Err(SweepError::Internal("word overflows block".into()));
        }
        Ok(())
    }
}

/// All-ones index value of [`INDEX_BITS`] width.
pub const fn not_found_index() -> u64 {
    (1u64 << INDEX_BITS) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{Sha224, Sha384};

    #[test]
    fn salt_is_zero_padded() {
        let salt = SaltConfig::new(b"abc", SaltPosition::Back).unwrap();
        assert_eq!(&salt.bytes, b"abc\0\0\0\0\0");
        assert_eq!(salt.extra_len(), SALT_BYTES);
        assert_eq!(salt.message_offset(), 0);
        assert!(SaltConfig::new(b"123456789", SaltPosition::Front).is_err());
    }

    #[test]
    fn front_salt_shifts_message() {
        let salt = SaltConfig::new(b"s", SaltPosition::Front).unwrap();
        assert_eq!(salt.message_offset(), SALT_BYTES);
        assert_eq!(SaltConfig::none().message_offset(), 0);
    }

    #[test]
    fn mode_and_position_from_flags() {
        assert_eq!(Mode::try_from(0u8).unwrap(), Mode::Enumerate);
        assert_eq!(Mode::try_from(1u8).unwrap(), Mode::Search);
        assert!(Mode::try_from(2u8).is_err());
        assert_eq!(SaltPosition::try_from(1u8).unwrap(), SaltPosition::Back);
        assert!(SaltPosition::try_from(7u8).is_err());
    }

    #[test]
    fn rejects_bad_runs() {
        let src = BruteSource { len: 8, leads: vec![b'a'] };
        assert!(RunConfig::enumerate(1).validate_brute::<Sha224>(&src).is_err());

        let src = BruteSource { len: 2, leads: vec![] };
        assert!(RunConfig::enumerate(1).validate_brute::<Sha224>(&src).is_err());

        let mut cfg = RunConfig::enumerate(1);
        cfg.mode = Mode::Search;
        let src = BruteSource { len: 2, leads: vec![b'a'] };
        assert!(cfg.validate_brute::<Sha384>(&src).is_err());

        let past_space = RunConfig::enumerate(space_size(2) + 1);
        assert!(past_space.validate_brute::<Sha384>(&src).is_err());

        let wide = BruteSource { len: 7, leads: b"abcde".to_vec() };
        let full = RunConfig::enumerate(space_size(7));
        assert!(full.validate_brute::<Sha384>(&wide).is_err());
        let narrow = BruteSource { len: 7, leads: b"abcd".to_vec() };
        assert!(full.validate_brute::<Sha384>(&narrow).is_ok());

        assert!(RunConfig::enumerate(10).validate_wordlist::<Sha224>(33, 2).is_err());
        assert!(RunConfig::enumerate(10).validate_wordlist::<Sha224>(32, 2).is_ok());
    }

    #[test]
    fn golden_width_is_checked() {
        let mut bytes = [0u8; 64];
        bytes[40] = 1; // beyond the 28-byte SHA-224 digest
        let golden = PackedDigest::from_bytes(bytes);
        let src = BruteSource { len: 1, leads: vec![b'a'] };
        let cfg = RunConfig::search(4, golden);
        assert!(cfg.validate_brute::<Sha224>(&src).is_err());
        assert!(cfg.validate_brute::<Sha384>(&src).is_ok());
    }
}
