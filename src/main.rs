use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use hashsweep::io_utils::{io_cli_error, simple_cli_error, sweep_cli_error, CliError};
use hashsweep::report::{
    write_csv, write_json, write_raw, write_results_txt, CandidateLookup, RunSummary,
};
use hashsweep::{
    brute_candidate, not_found_index, read_wordlist, run_brute, run_wordlist, BruteSource,
    Candidate, Executor, HashVariant, Mode, PackedDigest, RunConfig, RunOutcome, SaltConfig,
    SaltPosition, Sha224, Sha384,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hashsweep", about = "Parallel SHA-224/SHA-384 preimage search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enumerate `<lead><len symbols>` candidates with one lane per leading byte
    Brute {
        /// Number of enumerated positions after the leading byte (0-7)
        #[arg(long, default_value_t = 4)]
        len: usize,
        /// Leading bytes as hex, one byte per lane
        #[arg(long, default_value = "6162")]
        leads: String,
        /// Steps to run; every lane hashes one candidate per step
        #[arg(long)]
        size: u64,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Hash every word of a newline separated wordlist
    Wordlist {
        /// Wordlist path
        input: PathBuf,
        /// Number of lanes the words are spread across
        #[arg(long, default_value_t = 2)]
        lanes: usize,
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Sha224,
    Sha384,
}

#[derive(Args)]
struct RunArgs {
    /// Hash function
    #[arg(long, value_enum, default_value_t = VariantArg::Sha224)]
    variant: VariantArg,
    /// 0 = enumerate every digest, 1 = search for the golden digest
    #[arg(long, default_value_t = 0)]
    mode: u8,
    /// Target digest in hex, exactly the variant's digest width
    #[arg(long)]
    golden: Option<String>,
    /// Salt of up to 8 bytes, zero padded
    #[arg(long)]
    salt: Option<String>,
    /// 0 = salt before the candidate (default), 1 = after it
    #[arg(long, requires = "salt")]
    salt_position: Option<u8>,
    /// Results file for enumerate runs
    #[arg(long, default_value = "results.txt")]
    output: PathBuf,
    /// Optional CSV output path for enumerate runs
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Optional raw dump of the 64-byte digest containers
    #[arg(long)]
    raw: Option<PathBuf>,
    /// Optional JSON run summary path
    #[arg(long)]
    json: Option<PathBuf>,
    /// Show a progress bar
    #[arg(long)]
    progress: bool,
    /// Run every lane on the calling thread
    #[arg(long)]
    sequential: bool,
    /// Capacity of each lane channel
    #[arg(long, default_value_t = hashsweep::config::DEFAULT_CHANNEL_DEPTH)]
    channel_depth: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Brute {
            len,
            leads,
            size,
            run,
        } => {
            let leads = hex::decode(leads.trim())
                .map_err(|e| simple_cli_error(&format!("--leads must be hex: {e}")))?;
            let source = BruteSource { len, leads };
            match run.variant {
                VariantArg::Sha224 => brute::<Sha224>(&source, size, &run),
                VariantArg::Sha384 => brute::<Sha384>(&source, size, &run),
            }
        }
        Command::Wordlist { input, lanes, run } => {
            let words = read_wordlist(&input).map_err(|e| match e {
                hashsweep::SweepError::Io(io) => io_cli_error("reading wordlist", &input, io),
                other => sweep_cli_error("reading wordlist", other),
            })?;
            match run.variant {
                VariantArg::Sha224 => wordlist::<Sha224>(&words, lanes, &run),
                VariantArg::Sha384 => wordlist::<Sha384>(&words, lanes, &run),
            }
        }
    }
}

fn brute<V: HashVariant>(source: &BruteSource, size: u64, args: &RunArgs) -> Result<(), CliError> {
    let config = run_config::<V>(args, size)?;
    let bar = progress_bar(args.progress, size.saturating_mul(source.lanes() as u64));
    let outcome = run_brute::<V>(source, &config, &bar).map_err(|e| sweep_cli_error("brute", e))?;
    bar.finish_and_clear();
    let lookup = |i: u64| brute_candidate(source, i);
    finish::<V>(&outcome, &config, source.lanes(), &lookup, args)
}

fn wordlist<V: HashVariant>(
    words: &[Candidate],
    lanes: usize,
    args: &RunArgs,
) -> Result<(), CliError> {
    let config = run_config::<V>(args, 0)?;
    let bar = progress_bar(args.progress, words.len() as u64);
    let outcome = run_wordlist::<V>(words, lanes, &config, &bar)
        .map_err(|e| sweep_cli_error("wordlist", e))?;
    bar.finish_and_clear();
    let lookup = |i: u64| words[i as usize];
    finish::<V>(&outcome, &config, lanes, &lookup, args)
}

fn run_config<V: HashVariant>(args: &RunArgs, size: u64) -> Result<RunConfig, CliError> {
    let mode = Mode::try_from(args.mode).map_err(|e| sweep_cli_error("--mode", e))?;
    let mut config = match mode {
        Mode::Enumerate => RunConfig::enumerate(size),
        Mode::Search => {
            let hex = args
                .golden
                .as_deref()
                .ok_or_else(|| simple_cli_error("search mode (--mode 1) requires --golden"))?;
            let golden =
                PackedDigest::from_hex::<V>(hex).map_err(|e| sweep_cli_error("--golden", e))?;
            RunConfig::search(size, golden)
        }
    };
    if let Some(salt) = &args.salt {
        let position = SaltPosition::try_from(args.salt_position.unwrap_or(0))
            .map_err(|e| sweep_cli_error("--salt-position", e))?;
        let salt =
            SaltConfig::new(salt.as_bytes(), position).map_err(|e| sweep_cli_error("--salt", e))?;
        config = config.with_salt(salt);
    }
    if args.sequential {
        config = config.with_executor(Executor::Sequential);
    }
    config.channel_depth = args.channel_depth;
    Ok(config)
}

fn progress_bar(enabled: bool, total: u64) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec} hashes/s)")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

fn create(path: &Path, what: &str) -> Result<BufWriter<File>, CliError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| io_cli_error(what, path, e))
}

fn finish<V: HashVariant>(
    outcome: &RunOutcome,
    config: &RunConfig,
    lanes: usize,
    lookup: CandidateLookup<'_>,
    args: &RunArgs,
) -> Result<(), CliError> {
    let result = &outcome.result;
    match config.mode {
        Mode::Enumerate => {
            let digests = result.digests();
            let out = create(&args.output, "creating results file")?;
            write_results_txt::<V, _>(out, digests, lookup)
                .map_err(|e| sweep_cli_error("writing results", e))?;
            if let Some(path) = &args.csv {
                let out = create(path, "creating csv")?;
                write_csv::<V, _>(out, digests, lanes, lookup)
                    .map_err(|e| sweep_cli_error("writing csv", e))?;
            }
            if let Some(path) = &args.raw {
                let out = create(path, "creating raw dump")?;
                write_raw(out, digests).map_err(|e| sweep_cli_error("writing raw dump", e))?;
            }
            println!("{} digests written to {}", digests.len(), args.output.display());
        }
        Mode::Search => {
            if result.found() {
                let index = result.match_index();
                println!("found index {index}");
                println!("candidate {}", lookup(index));
            } else {
                println!("not found (index 0x{:X})", not_found_index());
            }
            if let Some(golden) = &config.golden {
                println!("golden 0x{}", golden.to_hex::<V>());
            }
        }
    }
    outcome.stats.report();

    if let Some(path) = &args.json {
        let summary = RunSummary::new::<V>(
            result,
            outcome.stats.clone(),
            config.golden.as_ref(),
            lookup,
        );
        let out = create(path, "creating json")?;
        write_json(out, &summary).map_err(|e| sweep_cli_error("writing json", e))?;
    }
    Ok(())
}
