//! The printable alphabet walked by the odometer.
//!
//! The order is fixed and is not ASCII order: lowercase letters first, then
//! uppercase, digits and finally the 32 punctuation symbols.

/// Number of symbols in [`CHARSET`].
pub const CHARSET_LEN: usize = 94;

pub const CHARSET: [u8; CHARSET_LEN] = *b"abcdefghijklmnopqrstuvwxyz\
ABCDEFGHIJKLMNOPQRSTUVWXYZ\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Symbol at charset index `idx`.
///
/// Panics if `idx >= CHARSET_LEN`.
#[inline]
pub fn symbol(idx: usize) -> u8 {
    CHARSET[idx]
}

/// Charset index of `byte`, if it belongs to the alphabet.
pub fn position(byte: u8) -> Option<usize> {
    CHARSET.iter().position(|&c| c == byte)
}
