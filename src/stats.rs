//! Progress reporting and end-of-run throughput figures.
//!
//! The engine only talks to the [`Progress`] trait, so library callers can
//! plug in an `indicatif` bar, their own sink, or [`NoProgress`].

use std::time::Duration;

use indicatif::ProgressBar;
use serde::Serialize;
use tracing::info;

use crate::config::{Executor, Mode};

/// Receives hash counts as a run advances.
pub trait Progress {
    fn advance(&self, hashes: u64);
}

/// Discards all progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn advance(&self, _hashes: u64) {}
}

impl Progress for ProgressBar {
    fn advance(&self, hashes: u64) {
        self.inc(hashes);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub variant: &'static str,
    pub mode: Mode,
    pub executor: Executor,
    pub lanes: usize,
    pub steps: u64,
    pub hashes: u64,
    pub elapsed_ms: u64,
    /// Million hashes per second; zero for runs too short to time.
    pub mhs: f64,
}

impl RunStats {
    pub fn new(
        variant: &'static str,
        mode: Mode,
        executor: Executor,
        lanes: usize,
        steps: u64,
        hashes: u64,
        elapsed: Duration,
    ) -> Self {
        let secs = elapsed.as_secs_f64();
        let mhs = if secs > 0.0 {
            hashes as f64 / secs / 1_000_000.0
        } else {
            0.0
        };
        Self {
            variant,
            mode,
            executor,
            lanes,
            steps,
            hashes,
            elapsed_ms: elapsed.as_millis() as u64,
            mhs,
        }
    }

    pub fn report(&self) {
        info!(
            variant = self.variant,
            lanes = self.lanes,
            hashes = self.hashes,
            elapsed_ms = self.elapsed_ms,
            "{:.2} MH/s",
            self.mhs
        );
    }
}
