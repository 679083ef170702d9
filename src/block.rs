//! Single-block Merkle–Damgård padding.
//!
//! Layout of a padded block, most significant byte first:
//!
//! ```text
//! [salt?][message][salt?] 0x80 00 .. 00 [bit length, big endian]
//! ```
//!
//! Only messages that fit one block are supported. Callers validate lengths
//! up front with [`fits_single_block`]; there is no multi-block fallback.

use std::fmt;

use crate::config::{SaltConfig, SaltPosition, SALT_BYTES};
use crate::variant::HashVariant;
use crate::word::Word;

/// Largest block size across variants (SHA-384 uses 1024 bits).
pub const MAX_BLOCK_BYTES: usize = 128;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Block {
    bytes: [u8; MAX_BLOCK_BYTES],
    size: usize,
}

impl Block {
    /// All-zero block of `size` bytes.
    pub fn zeroed(size: usize) -> Self {
        assert!(size <= MAX_BLOCK_BYTES);
        Self {
            bytes: [0; MAX_BLOCK_BYTES],
            size,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.size]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Overwrite one byte in place.
    pub fn set_byte(&mut self, offset: usize, value: u8) {
        self.bytes[..self.size][offset] = value;
    }

    /// Big-endian word `i` of the block.
    pub fn word<W: Word>(&self, i: usize) -> W {
        W::from_be_slice(&self.bytes[i * W::BYTES..])
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", hex::encode(self.as_bytes()))
    }
}

/// Whether a `msg_len`-byte message plus salt, delimiter and length field fits
/// one block of variant `V`.
pub fn fits_single_block<V: HashVariant>(msg_len: usize, salt: &SaltConfig) -> bool {
    msg_len + salt.extra_len() + 1 + V::LENGTH_FIELD_BYTES <= V::BLOCK_BYTES
}

/// Pad `msg` (optionally salted) into one block of variant `V`.
///
/// With an empty message and an enabled salt the block carries only the
/// salt. The caller guarantees the message fits; see [`fits_single_block`].
pub fn pad_message<V: HashVariant>(msg: &[u8], salt: &SaltConfig) -> Block {
    debug_assert!(fits_single_block::<V>(msg.len(), salt));
    let mut block = Block::zeroed(V::BLOCK_BYTES);
    let buf = &mut block.bytes;

    let total = msg.len() + salt.extra_len();
    if salt.enabled {
        match salt.position {
            SaltPosition::Front => {
                buf[..SALT_BYTES].copy_from_slice(&salt.bytes);
                buf[SALT_BYTES..total].copy_from_slice(msg);
            }
            SaltPosition::Back => {
                buf[..msg.len()].copy_from_slice(msg);
                buf[msg.len()..total].copy_from_slice(&salt.bytes);
            }
        }
    } else {
        buf[..total].copy_from_slice(msg);
    }

    buf[total] = 0x80;

    let bits = (total as u128 * 8).to_be_bytes();
    let field = V::LENGTH_FIELD_BYTES;
    buf[V::BLOCK_BYTES - field..V::BLOCK_BYTES].copy_from_slice(&bits[bits.len() - field..]);
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{Sha224, Sha384};

    #[test]
    fn abc_layout_sha224() {
        let block = pad_message::<Sha224>(b"abc", &SaltConfig::none());
        let bytes = block.as_bytes();
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[..4], &[b'a', b'b', b'c', 0x80]);
        assert!(bytes[4..63].iter().all(|&b| b == 0));
        assert_eq!(bytes[63], 24);
    }

    #[test]
    fn length_field_is_128_bits_for_sha384() {
        let block = pad_message::<Sha384>(&[0x11; 20], &SaltConfig::none());
        let bytes = block.as_bytes();
        assert_eq!(bytes.len(), 128);
        assert_eq!(bytes[20], 0x80);
        assert!(bytes[112..126].iter().all(|&b| b == 0));
        assert_eq!(u16::from_be_bytes([bytes[126], bytes[127]]), 160);
    }

    #[test]
    fn salt_front_and_back() {
        let front = SaltConfig::new(b"SALT", SaltPosition::Front).unwrap();
        let block = pad_message::<Sha224>(b"pw", &front);
        assert_eq!(&block.as_bytes()[..11], b"SALT\0\0\0\0pw\x80");
        assert_eq!(block.as_bytes()[63], 80);

        let back = SaltConfig::new(b"SALT", SaltPosition::Back).unwrap();
        let block = pad_message::<Sha224>(b"pw", &back);
        assert_eq!(&block.as_bytes()[..11], b"pwSALT\0\0\0\0\x80");
    }

    #[test]
    fn empty_message_with_salt_holds_only_salt() {
        for pos in [SaltPosition::Front, SaltPosition::Back] {
            let salt = SaltConfig::new(b"12345678", pos).unwrap();
            let block = pad_message::<Sha384>(b"", &salt);
            assert_eq!(&block.as_bytes()[..9], b"12345678\x80");
            assert_eq!(block.as_bytes()[127], 64);
        }
    }

    #[test]
    fn capacity_limits() {
        let salt = SaltConfig::new(b"x", SaltPosition::Front).unwrap();
        assert!(fits_single_block::<Sha224>(32, &salt));
        assert!(fits_single_block::<Sha224>(55, &SaltConfig::none()));
        assert!(!fits_single_block::<Sha224>(56, &SaltConfig::none()));
        assert!(fits_single_block::<Sha384>(111, &SaltConfig::none()));
        assert!(!fits_single_block::<Sha384>(112, &SaltConfig::none()));
    }

    #[test]
    fn words_are_big_endian() {
        let block = pad_message::<Sha224>(b"abc", &SaltConfig::none());
        assert_eq!(block.word::<u32>(0), 0x6162_6380);
        assert_eq!(block.word::<u32>(15), 24);
    }
}
