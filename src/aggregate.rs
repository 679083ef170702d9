//! Sequential reduction of lane outputs.
//!
//! The aggregator is the single writer of run results. It consumes one step
//! at a time, lanes in ascending order, so the output order and the
//! first-match tie-break depend only on `(step, lane)` and never on which
//! lane finished first.

use tracing::info;

use crate::config::{not_found_index, Mode};
use crate::digest::PackedDigest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    Collect,
    Done,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Every digest, position `step * lanes + lane`.
    Enumerated { digests: Vec<PackedDigest> },
    /// Lowest matching global index, if any.
    Searched { index: Option<u64> },
}

impl SearchResult {
    /// Match index with the all-ones sentinel for "not found" and for
    /// enumerate runs.
    pub fn match_index(&self) -> u64 {
        match self {
            SearchResult::Searched { index: Some(i) } => *i,
            _ => not_found_index(),
        }
    }

    pub fn found(&self) -> bool {
        matches!(self, SearchResult::Searched { index: Some(_) })
    }

    /// Digests of an enumerate run; empty for search runs.
    pub fn digests(&self) -> &[PackedDigest] {
        match self {
            SearchResult::Enumerated { digests } => digests,
            SearchResult::Searched { .. } => &[],
        }
    }
}

pub struct Aggregator {
    mode: Mode,
    golden: PackedDigest,
    lanes: u64,
    state: AggregatorState,
    step: u64,
    digests: Vec<PackedDigest>,
    found: Option<u64>,
}

impl Aggregator {
    /// `golden` is ignored in enumerate mode. `expected` sizes the output
    /// buffer up front.
    pub fn new(mode: Mode, golden: Option<PackedDigest>, lanes: usize, expected: usize) -> Self {
        let digests = match mode {
            Mode::Enumerate => Vec::with_capacity(expected),
            Mode::Search => Vec::new(),
        };
        Self {
            mode,
            golden: golden.unwrap_or_default(),
            lanes: lanes as u64,
            state: AggregatorState::Collect,
            step: 0,
            digests,
            found: None,
        }
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    /// Steps consumed so far.
    pub fn steps(&self) -> u64 {
        self.step
    }

    /// Consume the outputs of the next step, indexed by lane.
    ///
    /// `None` entries are empty wordlist slots; they only ever trail the
    /// final step and are neither stored nor compared.
    pub fn push_step(&mut self, outputs: &[Option<PackedDigest>]) {
        debug_assert_eq!(self.state, AggregatorState::Collect);
        debug_assert_eq!(outputs.len() as u64, self.lanes);
        match self.mode {
            Mode::Enumerate => {
                for (lane, digest) in outputs.iter().enumerate() {
                    if let Some(d) = digest {
                        debug_assert_eq!(
                            self.digests.len() as u64,
                            self.step * self.lanes + lane as u64
                        );
                        self.digests.push(*d);
                    }
                }
            }
            Mode::Search => {
                if self.found.is_none() {
                    let hit = outputs
                        .iter()
                        .position(|d| d.as_ref() == Some(&self.golden));
                    if let Some(lane) = hit {
                        let index = self.step * self.lanes + lane as u64;
                        info!(index, step = self.step, lane, "golden digest matched");
                        self.found = Some(index);
                    }
                }
            }
        }
        self.step += 1;
    }

    /// Close the run and hand out the result.
    pub fn finish(mut self) -> SearchResult {
        self.state = AggregatorState::Done;
        match self.mode {
            Mode::Enumerate => SearchResult::Enumerated {
                digests: self.digests,
            },
            Mode::Search => SearchResult::Searched { index: self.found },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(tag: u8) -> Option<PackedDigest> {
        let mut b = [0u8; 64];
        b[0] = tag;
        Some(PackedDigest(b))
    }

    #[test]
    fn enumerate_orders_lane_minor() {
        let mut agg = Aggregator::new(Mode::Enumerate, None, 2, 4);
        agg.push_step(&[d(1), d(2)]);
        agg.push_step(&[d(3), d(4)]);
        assert_eq!(agg.state(), AggregatorState::Collect);
        let res = agg.finish();
        let tags: Vec<u8> = res.digests().iter().map(|p| p.0[0]).collect();
        assert_eq!(tags, [1, 2, 3, 4]);
        assert_eq!(res.match_index(), not_found_index());
        assert!(!res.found());
    }

    #[test]
    fn search_keeps_first_match() {
        let golden = d(7);
        let mut agg = Aggregator::new(Mode::Search, golden, 3, 0);
        agg.push_step(&[d(1), d(2), d(3)]);
        agg.push_step(&[d(0), d(7), d(7)]);
        agg.push_step(&[d(7), d(0), d(0)]);
        let res = agg.finish();
        assert!(res.found());
        assert_eq!(res.match_index(), 4);
    }

    #[test]
    fn search_without_match_reports_sentinel() {
        let mut agg = Aggregator::new(Mode::Search, d(9), 2, 0);
        agg.push_step(&[d(1), d(2)]);
        let res = agg.finish();
        assert_eq!(res, SearchResult::Searched { index: None });
        assert_eq!(res.match_index(), (1u64 << 48) - 1);
    }

    #[test]
    fn empty_run_is_terminal_immediately() {
        let agg = Aggregator::new(Mode::Enumerate, None, 4, 0);
        assert_eq!(agg.steps(), 0);
        assert!(agg.finish().digests().is_empty());
    }

    #[test]
    fn empty_slots_never_match() {
        let mut agg = Aggregator::new(Mode::Search, Some(PackedDigest::default()), 2, 0);
        agg.push_step(&[d(1), None]);
        assert!(!agg.finish().found());
    }
}
