//! Fan-out of candidates to lanes.
//!
//! A dispatcher produces, for every global step, one padded block per lane.
//! Lanes never see each other's inputs once a step has been handed out.

use std::marker::PhantomData;

use crate::block::{pad_message, Block};
use crate::candidate::Candidate;
use crate::config::{BruteSource, SaltConfig};
use crate::odometer::{Odometer, MAX_ENUM_LEN};
use crate::variant::HashVariant;
use crate::wordlist::FetchUnit;

/// Source of per-step lane inputs. `None` marks a slot with no candidate.
pub trait Dispatch: Send {
    fn lanes(&self) -> usize;

    /// Total number of steps this source will produce.
    fn steps(&self) -> u64;

    /// Fill `out` (cleared first) with this step's inputs, one per lane.
    /// Returns `false` once the source is exhausted.
    fn next_step(&mut self, out: &mut Vec<Option<Block>>) -> bool;
}

/// Enumeration mode: one shared odometer drives every lane.
///
/// Each step pads the enumerated tail once behind a placeholder byte, then
/// stamps each lane's leading byte into that placeholder. The placeholder
/// sits right after the salt when the salt is front-positioned and at
/// offset 0 otherwise.
pub struct BruteDispatcher<V: HashVariant> {
    odometer: Odometer,
    leads: Vec<u8>,
    salt: SaltConfig,
    size: u64,
    remaining: u64,
    _variant: PhantomData<V>,
}

impl<V: HashVariant> BruteDispatcher<V> {
    pub fn new(source: &BruteSource, salt: SaltConfig, size: u64) -> Self {
        Self {
            odometer: Odometer::new(source.len),
            leads: source.leads.clone(),
            salt,
            size,
            remaining: size,
            _variant: PhantomData,
        }
    }

    /// Block for the current counter with the leading byte left at zero.
    fn root_block(&self) -> Block {
        let len = self.odometer.len();
        let mut msg = [0u8; MAX_ENUM_LEN + 1];
        self.odometer.write_symbols(&mut msg[1..=len]);
        pad_message::<V>(&msg[..=len], &self.salt)
    }
}

impl<V: HashVariant> Dispatch for BruteDispatcher<V> {
    fn lanes(&self) -> usize {
        self.leads.len()
    }

    fn steps(&self) -> u64 {
        self.size
    }

    fn next_step(&mut self, out: &mut Vec<Option<Block>>) -> bool {
        out.clear();
        if self.remaining == 0 {
            return false;
        }
        let root = self.root_block();
        let offset = self.salt.message_offset();
        out.extend(self.leads.iter().map(|&lead| {
            let mut block = root;
            block.set_byte(offset, lead);
            Some(block)
        }));
        self.odometer.advance();
        self.remaining -= 1;
        true
    }
}

/// Wordlist mode: pre-packed units, one word per lane per step.
pub struct WordlistDispatcher<V: HashVariant> {
    units: std::vec::IntoIter<FetchUnit>,
    total: u64,
    lanes: usize,
    salt: SaltConfig,
    _variant: PhantomData<V>,
}

impl<V: HashVariant> WordlistDispatcher<V> {
    pub fn new(units: Vec<FetchUnit>, lanes: usize, salt: SaltConfig) -> Self {
        Self {
            total: units.len() as u64,
            units: units.into_iter(),
            lanes,
            salt,
            _variant: PhantomData,
        }
    }
}

impl<V: HashVariant> Dispatch for WordlistDispatcher<V> {
    fn lanes(&self) -> usize {
        self.lanes
    }

    fn steps(&self) -> u64 {
        self.total
    }

    fn next_step(&mut self, out: &mut Vec<Option<Block>>) -> bool {
        out.clear();
        let Some(unit) = self.units.next() else {
            return false;
        };
        out.extend(
            unit.slots
                .iter()
                .map(|slot| slot.as_ref().map(|word| pad_message::<V>(word.as_bytes(), &self.salt))),
        );
        true
    }
}

/// Candidate that enumeration mode hashes at global index `index`.
///
/// # Panics
///
/// Panics if `source` has no leading bytes. Steps past `94^len` wrap.
pub fn brute_candidate(source: &BruteSource, index: u64) -> Candidate {
    assert!(!source.leads.is_empty(), "enumeration source has no lanes");
    let lanes = source.lanes() as u64;
    let lane = (index % lanes) as usize;
    Odometer::at(index / lanes, source.len).candidate(source.leads[lane])
}
