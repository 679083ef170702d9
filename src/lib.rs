//! Parallel preimage search over SHA-224 and SHA-384.
//!
//! Candidates come either from a 94-symbol odometer behind a per-lane
//! leading byte, or from a wordlist packed round-robin across lanes. Each
//! candidate is padded into a single block, optionally salted, and reduced
//! by a generic SHA-2 compression that keeps only a 16-word schedule window.
//! Results are ordered by the global index `step * lanes + lane` no matter
//! how lanes are scheduled.

pub mod aggregate;
pub mod block;
pub mod candidate;
pub mod charset;
pub mod compress;
pub mod config;
pub mod digest;
pub mod dispatch;
pub mod engine;
mod error;
pub mod io_utils;
pub mod odometer;
pub mod report;
pub mod schedule;
pub mod stats;
pub mod variant;
pub mod word;
pub mod wordlist;

pub use aggregate::{Aggregator, SearchResult};
pub use block::{fits_single_block, pad_message, Block};
pub use candidate::Candidate;
pub use compress::{compress, hash_message};
pub use config::{
    not_found_index, BruteSource, Executor, Mode, RunConfig, SaltConfig, SaltPosition,
};
pub use digest::{Digest, PackedDigest};
pub use dispatch::{brute_candidate, Dispatch};
pub use engine::{execute, run_brute, run_wordlist, RunOutcome};
pub use error::SweepError;
pub use odometer::{candidate_at, space_size, Odometer};
pub use stats::{NoProgress, Progress, RunStats};
pub use variant::{HashVariant, Sha224, Sha384};
pub use wordlist::read_wordlist;
