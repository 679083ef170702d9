//! The SHA-2 round pipeline, generic over word width.
//!
//! One padded [`Block`] goes in, one truncated [`Digest`] comes out. The
//! state starts at the variant's IV, runs `V::ROUNDS` rounds fed from a
//! [`ScheduleWindow`], and the first `V::DIGEST_WORDS` words of
//! `state + IV` form the digest.

use crate::block::{pad_message, Block};
use crate::config::SaltConfig;
use crate::digest::Digest;
use crate::schedule::ScheduleWindow;
use crate::variant::HashVariant;
use crate::word::Word;

/// Working variables `a..h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState<W: Word>(pub [W; 8]);

impl<W: Word> RoundState<W> {
    /// Apply one round with constant `k` and schedule word `w`.
    #[inline(always)]
    pub fn round(self, k: W, w: W) -> Self {
        let [a, b, c, d, e, f, g, h] = self.0;
        let t1 = h
            .add(e.big_sigma1())
            .add(W::ch(e, f, g))
            .add(k)
            .add(w);
        let t2 = a.big_sigma0().add(W::maj(a, b, c));
        Self([t1.add(t2), a, b, c, d.add(t1), e, f, g])
    }
}

/// Reduce one block to a digest of variant `V`.
pub fn compress<V: HashVariant>(block: &Block) -> Digest {
    let iv = V::initial_state();
    let constants = V::round_constants();
    let mut state = RoundState(iv);
    let mut window = ScheduleWindow::<V::Word>::from_block(block);

    for (t, &k) in constants.iter().enumerate().take(V::ROUNDS) {
        state = state.round(k, window.current());
        window.advance(t);
    }

    let mut out = [V::Word::default(); 8];
    for (o, (s, i)) in out.iter_mut().zip(state.0.iter().zip(iv.iter())) {
        *o = s.add(*i);
    }
    Digest::from_words(&out[..V::DIGEST_WORDS])
}

/// Pad and compress a short message in one call.
pub fn hash_message<V: HashVariant>(msg: &[u8], salt: &SaltConfig) -> Digest {
    compress::<V>(&pad_message::<V>(msg, salt))
}
