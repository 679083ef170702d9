//! Sliding 16-word message schedule.
//!
//! Only sixteen schedule words are ever held. `window[0]` is the word mixed
//! into the current round. Advancing rotates the window left by one; from
//! round 15 on, the slot that becomes the new head is refilled with a freshly
//! derived word:
//!
//! ```text
//! new = window[1] + σ0(window[2]) + window[10] + σ1(window[15])
//! ```
//!
//! After round `t >= 15` the window reads `[W[t+1], W[t-14], ..., W[t]]`,
//! which is exactly the set of inputs the next derivation needs.

use crate::block::Block;
use crate::word::Word;

/// First round whose advance derives a new word instead of passing one through.
pub const DERIVE_FROM_ROUND: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow<W: Word> {
    window: [W; 16],
}

impl<W: Word> ScheduleWindow<W> {
    /// Seed the window with the block's first sixteen words.
    pub fn from_block(block: &Block) -> Self {
        let mut window = [W::default(); 16];
        for (i, w) in window.iter_mut().enumerate() {
            *w = block.word(i);
        }
        Self { window }
    }

    /// Schedule word for the current round.
    #[inline(always)]
    pub fn current(&self) -> W {
        self.window[0]
    }

    /// Move past round `round`.
    #[inline(always)]
    pub fn advance(&mut self, round: usize) {
        let w = &self.window;
        let derived = w[1]
            .add(w[2].small_sigma0())
            .add(w[10])
            .add(w[15].small_sigma1());
        self.window.rotate_left(1);
        if round >= DERIVE_FROM_ROUND {
            self.window[0] = derived;
        }
    }
}
