//! Word-width abstraction for the SHA-2 round functions.
//!
//! The 32-bit and 64-bit families share the same round structure and differ
//! only in word size and rotation amounts, so both are generated from one
//! macro.

use std::fmt::Debug;

pub trait Word: Copy + Default + Eq + Debug + Send + Sync + 'static {
    /// Width of the word in bytes.
    const BYTES: usize;

    /// Load a big-endian word from the first `BYTES` bytes of `bytes`.
    fn from_be_slice(bytes: &[u8]) -> Self;

    /// Store the word big-endian into the first `BYTES` bytes of `out`.
    fn write_be(self, out: &mut [u8]);

    /// Addition modulo `2^W`.
    fn add(self, rhs: Self) -> Self;

    fn big_sigma0(self) -> Self;
    fn big_sigma1(self) -> Self;
    fn small_sigma0(self) -> Self;
    fn small_sigma1(self) -> Self;

    /// Choose: bits of `y` where `x` is set, bits of `z` elsewhere.
    fn ch(x: Self, y: Self, z: Self) -> Self;

    /// Majority of the three inputs, bitwise.
    fn maj(x: Self, y: Self, z: Self) -> Self;
}

macro_rules! impl_word {
    ($ty:ty, big0: [$a0:expr, $a1:expr, $a2:expr], big1: [$b0:expr, $b1:expr, $b2:expr],
     small0: [$c0:expr, $c1:expr, $c2:expr], small1: [$d0:expr, $d1:expr, $d2:expr]) => {
        impl Word for $ty {
            const BYTES: usize = std::mem::size_of::<$ty>();

            #[inline(always)]
            fn from_be_slice(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(&bytes[..Self::BYTES]);
                <$ty>::from_be_bytes(buf)
            }

            #[inline(always)]
            fn write_be(self, out: &mut [u8]) {
                out[..Self::BYTES].copy_from_slice(&self.to_be_bytes());
            }

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline(always)]
            fn big_sigma0(self) -> Self {
                self.rotate_right($a0) ^ self.rotate_right($a1) ^ self.rotate_right($a2)
            }

            #[inline(always)]
            fn big_sigma1(self) -> Self {
                self.rotate_right($b0) ^ self.rotate_right($b1) ^ self.rotate_right($b2)
            }

            #[inline(always)]
            fn small_sigma0(self) -> Self {
                self.rotate_right($c0) ^ self.rotate_right($c1) ^ (self >> $c2)
            }

            #[inline(always)]
            fn small_sigma1(self) -> Self {
                self.rotate_right($d0) ^ self.rotate_right($d1) ^ (self >> $d2)
            }

            #[inline(always)]
            fn ch(x: Self, y: Self, z: Self) -> Self {
                (x & y) ^ (!x & z)
            }

            #[inline(always)]
            fn maj(x: Self, y: Self, z: Self) -> Self {
                (x & y) ^ (x & z) ^ (y & z)
            }
        }
    };
}

impl_word!(u32, big0: [2, 13, 22], big1: [6, 11, 25], small0: [7, 18, 3], small1: [17, 19, 10]);
impl_word!(u64, big0: [28, 34, 39], big1: [14, 18, 41], small0: [1, 8, 7], small1: [19, 61, 6]);
