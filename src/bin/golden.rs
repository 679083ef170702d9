//! Prints the golden digest for a candidate, ready for `hashsweep --golden`.

use clap::{Parser, ValueEnum};
use hashsweep::io_utils::{simple_cli_error, sweep_cli_error, CliError};
use hashsweep::{
    brute_candidate, hash_message, space_size, BruteSource, Candidate, HashVariant, SaltConfig,
    SaltPosition, Sha224, Sha384,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Sha224,
    Sha384,
}

#[derive(Parser)]
struct Args {
    /// Candidate to hash; omit when using --index
    candidate: Option<String>,
    #[arg(long, value_enum, default_value_t = VariantArg::Sha224)]
    variant: VariantArg,
    /// Global index of an enumeration run instead of a literal candidate
    #[arg(long, requires = "leads")]
    index: Option<u64>,
    /// Enumeration length for --index
    #[arg(long, default_value_t = 4)]
    len: usize,
    /// Leading bytes as hex for --index
    #[arg(long)]
    leads: Option<String>,
    #[arg(long)]
    salt: Option<String>,
    #[arg(long, requires = "salt")]
    salt_position: Option<u8>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();
    let candidate = resolve_candidate(&args)?;
    let salt = match &args.salt {
        Some(s) => {
            let position = SaltPosition::try_from(args.salt_position.unwrap_or(0))
                .map_err(|e| sweep_cli_error("--salt-position", e))?;
            SaltConfig::new(s.as_bytes(), position).map_err(|e| sweep_cli_error("--salt", e))?
        }
        None => SaltConfig::none(),
    };
    let hex = match args.variant {
        VariantArg::Sha224 => golden_hex::<Sha224>(&candidate, &salt),
        VariantArg::Sha384 => golden_hex::<Sha384>(&candidate, &salt),
    };
    info!(%candidate, "golden digest computed");
    println!("0x{hex}");
    Ok(())
}

fn resolve_candidate(args: &Args) -> Result<Candidate, CliError> {
    match (&args.candidate, args.index, &args.leads) {
        (Some(text), None, _) => {
            Candidate::new(text.as_bytes()).map_err(|e| sweep_cli_error("candidate", e))
        }
        (None, Some(index), Some(leads)) => {
            let leads = hex::decode(leads.trim())
                .map_err(|e| simple_cli_error(&format!("--leads must be hex: {e}")))?;
            if leads.is_empty() {
                return Err(simple_cli_error("--leads needs at least one byte"));
            }
            if args.len > hashsweep::odometer::MAX_ENUM_LEN {
                return Err(simple_cli_error("--len must be 0-7"));
            }
            let source = BruteSource { len: args.len, leads };
            let total = space_size(source.len).saturating_mul(source.lanes() as u64);
            if index >= total {
                return Err(simple_cli_error(&format!(
                    "--index {index} is outside the {total} candidates of this enumeration"
                )));
            }
            Ok(brute_candidate(&source, index))
        }
        _ => Err(simple_cli_error("give either a candidate or --index with --leads")),
    }
}

fn golden_hex<V: HashVariant>(candidate: &Candidate, salt: &SaltConfig) -> String {
    hash_message::<V>(candidate.as_bytes(), salt).pack().to_hex::<V>()
}
