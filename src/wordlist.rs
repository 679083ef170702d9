//! Wordlist loading and packing into per-step fetch units.
//!
//! Word `i` lands in unit `i / lanes`, slot `i % lanes`, so the global index
//! `step * lanes + lane` of a digest is the word's position in the list.
//! Every slot carries an explicit length. A short final unit leaves its
//! remaining slots empty instead of padding them with zero-length words.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, warn};

use crate::candidate::{Candidate, MAX_CANDIDATE_LEN};
use crate::SweepError;

/// One fetch: at most one word per lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchUnit {
    pub slots: Vec<Option<Candidate>>,
}

/// Parse newline separated words from raw bytes.
///
/// Trailing `\r` and spaces are stripped and empty lines are skipped. Lines
/// longer than the slot size are skipped as well, never cut down, so every
/// hashed word appears verbatim in the input.
pub fn parse_words(data: &[u8]) -> Vec<Candidate> {
    let mut skipped = 0usize;
    let words: Vec<Candidate> = data
        .split(|&b| b == b'\n')
        .map(trim_line_end)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let word = Candidate::new(line).ok();
            if word.is_none() {
                skipped += 1;
            }
            word
        })
        .collect();
    if skipped > 0 {
        warn!(skipped, "skipped words longer than {MAX_CANDIDATE_LEN} bytes");
    }
    words
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|&b| b != b'\r' && b != b' ')
        .map_or(0, |i| i + 1);
    &line[..end]
}

/// Memory-map and parse a wordlist file.
pub fn read_wordlist<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, SweepError> {
    let file = File::open(path.as_ref())?;
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }
    // SAFETY: the mapping is read-only and dropped before this function returns.
    let mmap = unsafe { Mmap::map(&file)? };
    let words = parse_words(&mmap);
    debug!(path = %path.as_ref().display(), words = words.len(), "read wordlist");
    Ok(words)
}

/// Number of fetch units needed for `words` words over `lanes` lanes.
pub fn unit_count(words: usize, lanes: usize) -> u64 {
    words.div_ceil(lanes) as u64
}

/// Split `words` round-robin into units of `lanes` slots.
pub fn pack_units(words: &[Candidate], lanes: usize) -> Vec<FetchUnit> {
    words
        .chunks(lanes)
        .map(|chunk| {
            let mut slots: Vec<Option<Candidate>> = chunk.iter().copied().map(Some).collect();
            slots.resize(lanes, None);
            FetchUnit { slots }
        })
        .collect()
}
