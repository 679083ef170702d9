//! Run orchestration: feeder, lanes and the aggregator.
//!
//! In the threaded executor every lane is an OS thread joined to the rest
//! of the run by two bounded channels. A feeder thread pulls steps from the
//! dispatcher and hands one block to each lane; the calling thread plays
//! the aggregator and reads lane outputs strictly in `(step, lane)` order.
//! Channels are FIFO, so the `k`-th value a lane emits is always the digest
//! of step `k`, whatever the thread timings were.
//!
//! The sequential executor runs the same pipeline on the calling thread and
//! produces identical results.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use crate::aggregate::{Aggregator, SearchResult};
use crate::block::Block;
use crate::candidate::Candidate;
use crate::compress::compress;
use crate::config::{BruteSource, Executor, RunConfig};
use crate::digest::PackedDigest;
use crate::dispatch::{BruteDispatcher, Dispatch, WordlistDispatcher};
use crate::stats::{Progress, RunStats};
use crate::variant::HashVariant;
use crate::wordlist::{pack_units, unit_count};
use crate::SweepError;

/// Upper bound on the digests reserved up front in enumerate mode.
const PREALLOC_LIMIT: usize = 1 << 20;

/// Progress is reported in batches of at least this many hashes.
const PROGRESS_BATCH: u64 = 4096;

/// Result of a finished run together with its throughput figures.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: SearchResult,
    pub stats: RunStats,
}

/// Enumerate `config.size` steps of `source` with variant `V`.
pub fn run_brute<V: HashVariant>(
    source: &BruteSource,
    config: &RunConfig,
    progress: &dyn Progress,
) -> Result<RunOutcome, SweepError> {
    config.validate_brute::<V>(source)?;
    info!(
        variant = V::NAME,
        len = source.len,
        lanes = source.lanes(),
        size = config.size,
        mode = ?config.mode,
        "starting enumeration run"
    );
    let dispatcher = BruteDispatcher::<V>::new(source, config.salt, config.size);
    execute::<V, _>(dispatcher, config, progress)
}

/// Hash every word of `words` over `lanes` lanes.
///
/// The step count is derived from the word count; `config.size` is ignored.
pub fn run_wordlist<V: HashVariant>(
    words: &[Candidate],
    lanes: usize,
    config: &RunConfig,
    progress: &dyn Progress,
) -> Result<RunOutcome, SweepError> {
    let mut config = config.clone();
    config.size = if lanes == 0 {
        0
    } else {
        unit_count(words.len(), lanes)
    };
    let longest = words.iter().map(Candidate::len).max().unwrap_or(0);
    config.validate_wordlist::<V>(longest, lanes)?;
    info!(
        variant = V::NAME,
        words = words.len(),
        lanes,
        steps = config.size,
        mode = ?config.mode,
        "starting wordlist run"
    );
    let dispatcher = WordlistDispatcher::<V>::new(pack_units(words, lanes), lanes, config.salt);
    execute::<V, _>(dispatcher, &config, progress)
}

/// Drive `dispatcher` to exhaustion and aggregate the lane outputs.
///
/// No validation happens here; callers go through [`run_brute`] or
/// [`run_wordlist`] unless they have checked the configuration themselves.
pub fn execute<V: HashVariant, D: Dispatch>(
    dispatcher: D,
    config: &RunConfig,
    progress: &dyn Progress,
) -> Result<RunOutcome, SweepError> {
    let lanes = dispatcher.lanes();
    let steps = dispatcher.steps();
    let expected = usize::try_from(steps.saturating_mul(lanes as u64))
        .unwrap_or(usize::MAX)
        .min(PREALLOC_LIMIT);
    let aggregator = Aggregator::new(config.mode, config.golden, lanes, expected);
    let mut meter = Meter::new(progress);

    let start = Instant::now();
    let result = match config.executor {
        Executor::Threaded => {
            run_threaded::<V, D>(dispatcher, aggregator, config.channel_depth, &mut meter)?
        }
        Executor::Sequential => run_sequential::<V, D>(dispatcher, aggregator, &mut meter),
    };
    meter.flush();

    let stats = RunStats::new(
        V::NAME,
        config.mode,
        config.executor,
        lanes,
        steps,
        meter.hashes,
        start.elapsed(),
    );
    info!(
        hashes = stats.hashes,
        elapsed_ms = stats.elapsed_ms,
        found = result.found(),
        "run finished"
    );
    Ok(RunOutcome { result, stats })
}

/// Counts hashes and forwards them to the progress sink in batches.
struct Meter<'a> {
    progress: &'a dyn Progress,
    hashes: u64,
    pending: u64,
}

impl<'a> Meter<'a> {
    fn new(progress: &'a dyn Progress) -> Self {
        Self {
            progress,
            hashes: 0,
            pending: 0,
        }
    }

    fn record(&mut self, row: &[Option<PackedDigest>]) {
        let n = row.iter().flatten().count() as u64;
        self.hashes += n;
        self.pending += n;
        if self.pending >= PROGRESS_BATCH {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.pending > 0 {
            self.progress.advance(self.pending);
            self.pending = 0;
        }
    }
}

fn hash_row<V: HashVariant>(inputs: &[Option<Block>], row: &mut Vec<Option<PackedDigest>>) {
    row.clear();
    row.extend(
        inputs
            .iter()
            .map(|block| block.as_ref().map(|b| compress::<V>(b).pack())),
    );
}

fn run_sequential<V: HashVariant, D: Dispatch>(
    mut dispatcher: D,
    mut aggregator: Aggregator,
    meter: &mut Meter<'_>,
) -> SearchResult {
    let lanes = dispatcher.lanes();
    let mut inputs = Vec::with_capacity(lanes);
    let mut row = Vec::with_capacity(lanes);
    while dispatcher.next_step(&mut inputs) {
        hash_row::<V>(&inputs, &mut row);
        aggregator.push_step(&row);
        meter.record(&row);
    }
    aggregator.finish()
}

fn run_threaded<V: HashVariant, D: Dispatch>(
    dispatcher: D,
    mut aggregator: Aggregator,
    depth: usize,
    meter: &mut Meter<'_>,
) -> Result<SearchResult, SweepError> {
    let lanes = dispatcher.lanes();
    let steps = dispatcher.steps();

    thread::scope(|scope| -> Result<SearchResult, SweepError> {
        let mut inputs = Vec::with_capacity(lanes);
        let mut outputs = Vec::with_capacity(lanes);
        let mut workers = Vec::with_capacity(lanes);
        for lane in 0..lanes {
            let (in_tx, in_rx) = sync_channel::<Option<Block>>(depth);
            let (out_tx, out_rx) = sync_channel::<Option<PackedDigest>>(depth);
            let worker = thread::Builder::new()
                .name(format!("lane-{lane}"))
                .spawn_scoped(scope, move || lane_worker::<V>(lane, in_rx, out_tx))?;
            workers.push(worker);
            inputs.push(in_tx);
            outputs.push(out_rx);
        }
        let feeder = thread::Builder::new()
            .name("feeder".into())
            .spawn_scoped(scope, move || feed(dispatcher, inputs))?;

        let mut failure = collect(&mut aggregator, &outputs, steps, meter).err();
        // Unblocks any lane still trying to deliver after a failed collect.
        drop(outputs);

        match feeder.join() {
            Ok(Ok(fed)) => debug!(fed, "feeder finished"),
            Ok(Err(e)) => {
                failure.get_or_insert(e);
            }
            Err(_) => {
                failure.get_or_insert(SweepError::Lane("feeder thread panicked".into()));
            }
        }
        for (lane, worker) in workers.into_iter().enumerate() {
            match worker.join() {
                Ok(hashed) => debug!(lane, hashed, "lane joined"),
                Err(_) => {
                    failure.get_or_insert(SweepError::Lane(format!("lane {lane} panicked")));
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(aggregator.finish()),
        }
    })
}

/// Hash every block received on `input` until the feeder hangs up.
fn lane_worker<V: HashVariant>(
    lane: usize,
    input: Receiver<Option<Block>>,
    output: SyncSender<Option<PackedDigest>>,
) -> u64 {
    debug!(lane, "lane started");
    let mut hashed = 0u64;
    for block in input.iter() {
        let digest = block.map(|b| compress::<V>(&b).pack());
        if digest.is_some() {
            hashed += 1;
        }
        if output.send(digest).is_err() {
            debug!(lane, "aggregator gone, lane stopping early");
            break;
        }
    }
    hashed
}

fn feed<D: Dispatch>(
    mut dispatcher: D,
    lanes: Vec<SyncSender<Option<Block>>>,
) -> Result<u64, SweepError> {
    let mut step = Vec::with_capacity(lanes.len());
    let mut fed = 0u64;
    while dispatcher.next_step(&mut step) {
        for (lane, (tx, input)) in lanes.iter().zip(step.drain(..)).enumerate() {
            tx.send(input)
                .map_err(|_| SweepError::Lane(format!("lane {lane} closed at step {fed}")))?;
        }
        fed += 1;
    }
    Ok(fed)
}

fn collect(
    aggregator: &mut Aggregator,
    outputs: &[Receiver<Option<PackedDigest>>],
    steps: u64,
    meter: &mut Meter<'_>,
) -> Result<(), SweepError> {
    let mut row = Vec::with_capacity(outputs.len());
    for step in 0..steps {
        row.clear();
        for (lane, rx) in outputs.iter().enumerate() {
            let digest = rx.recv().map_err(|_| {
                SweepError::Lane(format!("lane {lane} stopped before step {step}"))
            })?;
            row.push(digest);
        }
        aggregator.push_step(&row);
        meter.record(&row);
    }
    Ok(())
}
