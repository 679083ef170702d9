//! Writers for run results.
//!
//! Enumerate runs can be written as text (`<candidate> 0x<HEX>` per line),
//! CSV, or the raw 64-byte containers back to back. Every run can also emit
//! a JSON summary.

use std::io::Write;

use serde::Serialize;

use crate::aggregate::SearchResult;
use crate::candidate::Candidate;
use crate::digest::PackedDigest;
use crate::stats::RunStats;
use crate::variant::HashVariant;
use crate::SweepError;

/// Maps a global index back to the candidate hashed there.
pub type CandidateLookup<'a> = &'a dyn Fn(u64) -> Candidate;

#[derive(Debug, Serialize)]
struct CsvRow {
    index: u64,
    step: u64,
    lane: u64,
    candidate: String,
    digest: String,
}

/// One line per digest: the candidate, a space, then `0x` and uppercase hex.
pub fn write_results_txt<V: HashVariant, W: Write>(
    mut out: W,
    digests: &[PackedDigest],
    candidate: CandidateLookup<'_>,
) -> Result<(), SweepError> {
    for (i, d) in digests.iter().enumerate() {
        writeln!(out, "{} 0x{}", candidate(i as u64), d.to_hex::<V>())?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_csv<V: HashVariant, W: Write>(
    out: W,
    digests: &[PackedDigest],
    lanes: usize,
    candidate: CandidateLookup<'_>,
) -> Result<(), SweepError> {
    let lanes = lanes.max(1) as u64;
    let mut wtr = csv::Writer::from_writer(out);
    for (i, d) in digests.iter().enumerate() {
        let index = i as u64;
        wtr.serialize(CsvRow {
            index,
            step: index / lanes,
            lane: index % lanes,
            candidate: candidate(index).to_string(),
            digest: d.to_hex::<V>(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Dump the containers exactly as the aggregator holds them.
pub fn write_raw<W: Write>(mut out: W, digests: &[PackedDigest]) -> Result<(), SweepError> {
    out.write_all(bytemuck::cast_slice(digests))?;
    out.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    #[serde(flatten)]
    pub stats: RunStats,
    pub digests: usize,
    pub found: bool,
    /// Sentinel-encoded match index, as the aggregator reports it.
    pub match_index: u64,
    pub candidate: Option<String>,
    pub golden: Option<String>,
}

impl RunSummary {
    pub fn new<V: HashVariant>(
        result: &SearchResult,
        stats: RunStats,
        golden: Option<&PackedDigest>,
        candidate: CandidateLookup<'_>,
    ) -> Self {
        let found = result.found();
        Self {
            stats,
            digests: result.digests().len(),
            found,
            match_index: result.match_index(),
            candidate: found.then(|| candidate(result.match_index()).to_string()),
            golden: golden.map(|g| format!("0x{}", g.to_hex::<V>())),
        }
    }
}

pub fn write_json<W: Write>(mut out: W, summary: &RunSummary) -> Result<(), SweepError> {
    serde_json::to_writer_pretty(&mut out, summary)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Executor, Mode};
    use crate::variant::Sha224;
    use std::time::Duration;

    fn digests() -> Vec<PackedDigest> {
        (1..=3u8)
            .map(|i| {
                let mut b = [0u8; 64];
                b[0] = i;
                b[27] = 0xAB;
                PackedDigest(b)
            })
            .collect()
    }

    fn lookup(i: u64) -> Candidate {
        Candidate::new(format!("w{i}").as_bytes()).unwrap()
    }

    #[test]
    fn text_lines_use_upper_hex() {
        let mut buf = Vec::new();
        write_results_txt::<Sha224, _>(&mut buf, &digests(), &lookup).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(first, format!("w0 0x01{}AB", "00".repeat(26)));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn csv_has_step_and_lane() {
        let mut buf = Vec::new();
        write_csv::<Sha224, _>(&mut buf, &digests(), 2, &lookup).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "index,step,lane,candidate,digest");
        assert!(lines[3].starts_with("2,1,0,w2,03"));
    }

    #[test]
    fn raw_dump_is_64_bytes_per_digest() {
        let mut buf = Vec::new();
        write_raw(&mut buf, &digests()).unwrap();
        assert_eq!(buf.len(), 3 * 64);
        assert_eq!(buf[64], 2);
    }

    #[test]
    fn summary_names_the_match() {
        let stats = RunStats::new(
            "sha224",
            Mode::Search,
            Executor::Threaded,
            2,
            4,
            8,
            Duration::from_millis(5),
        );
        let result = SearchResult::Searched { index: Some(5) };
        let summary = RunSummary::new::<Sha224>(&result, stats, None, &lookup);
        let mut buf = Vec::new();
        write_json(&mut buf, &summary).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["match_index"], 5);
        assert_eq!(v["candidate"], "w5");
        assert_eq!(v["lanes"], 2);
        assert!(v["golden"].is_null());
    }
}
