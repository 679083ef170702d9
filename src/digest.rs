//! Digest values and the 512-bit container they travel in.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::variant::HashVariant;
use crate::word::Word;
use crate::SweepError;

/// Size of the fixed output container in bytes.
pub const PACKED_DIGEST_BYTES: usize = 64;

/// Largest true digest (SHA-384).
pub const MAX_DIGEST_BYTES: usize = 48;

/// Truncated final state, `digest_words * W` bits long.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest {
    bytes: [u8; MAX_DIGEST_BYTES],
    len: usize,
}

impl Digest {
    /// Concatenate the given output words big-endian.
    pub fn from_words<W: Word>(words: &[W]) -> Self {
        let mut bytes = [0u8; MAX_DIGEST_BYTES];
        for (i, w) in words.iter().enumerate() {
            w.write_be(&mut bytes[i * W::BYTES..]);
        }
        Self {
            bytes,
            len: words.len() * W::BYTES,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Place the digest in the most significant bytes of a zeroed container.
    pub fn pack(&self) -> PackedDigest {
        let mut out = [0u8; PACKED_DIGEST_BYTES];
        out[..self.len].copy_from_slice(self.as_bytes());
        PackedDigest(out)
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.as_bytes())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode(self.as_bytes()))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Digest padded into a 512-bit container, true digest in the top bytes.
///
/// Golden digests are supplied in the same layout so a match is a plain
/// equality test.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct PackedDigest(pub [u8; PACKED_DIGEST_BYTES]);

impl PackedDigest {
    pub fn from_bytes(bytes: [u8; PACKED_DIGEST_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PACKED_DIGEST_BYTES] {
        &self.0
    }

    /// The top `V::digest_bytes()` bytes.
    pub fn digest_bytes<V: HashVariant>(&self) -> &[u8] {
        &self.0[..V::digest_bytes()]
    }

    /// True when nothing beyond the variant's digest width is set.
    pub fn is_valid_for<V: HashVariant>(&self) -> bool {
        self.0[V::digest_bytes()..].iter().all(|&b| b == 0)
    }

    /// Parse a hex digest of exactly the variant's width.
    pub fn from_hex<V: HashVariant>(text: &str) -> Result<Self, SweepError> {
        let text = text.trim();
        let text = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        let raw = hex::decode(text)
            .map_err(|e| SweepError::Config(format!("golden digest is not valid hex: {e}")))?;
        if raw.len() != V::digest_bytes() {
            return Err(SweepError::Config(format!(
                "golden digest must be {} hex characters for {}, got {}",
                V::digest_bytes() * 2,
                V::NAME,
                text.len()
            )));
        }
        let mut out = [0u8; PACKED_DIGEST_BYTES];
        out[..raw.len()].copy_from_slice(&raw);
        Ok(Self(out))
    }

    /// Uppercase hex of the variant's digest bytes.
    pub fn to_hex<V: HashVariant>(&self) -> String {
        hex::encode_upper(self.digest_bytes::<V>())
    }
}

impl Default for PackedDigest {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Debug for PackedDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedDigest({})", hex::encode(self.0))
    }
}
