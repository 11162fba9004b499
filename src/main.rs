//! Spyder CLI
//!
//! Usage:
//!   spyder --ref ref.rttm --hyp hyp.rttm                 # Overall DER
//!   spyder --ref ref.rttm --hyp hyp.rttm --uem all.uem   # Restrict to UEM
//!   spyder --ref ref.rttm --hyp hyp.rttm --per-file      # One row per recording
//!   spyder --ref ref.rttm --hyp hyp.rttm --json          # CorpusReport as JSON
//!   spyder --serve                                       # HTTP API server

use std::path::PathBuf;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use spyder::core::{load_rttm, load_uem, run_server, score_corpus};
use spyder::types::{CorpusReport, DerError, DerResult, Metrics, RegionMode, ScoringConfig};
use spyder::{DEFAULT_ADDR, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "spyder",
    version = VERSION,
    about = "Diarization error rate (DER) scoring",
    long_about = "Spyder scores a diarization hypothesis against a reference.\n\n\
                  Both are RTTM files; an optional UEM file restricts scoring to\n\
                  the listed spans. Speakers are matched one-to-one to maximize\n\
                  shared speaking time before errors are counted.\n\n\
                  Region modes:\n  \
                  all         - every scored region\n  \
                  single      - exactly one reference speaker\n  \
                  nonoverlap  - at most one reference speaker\n  \
                  overlap     - two or more reference speakers"
)]
struct Args {
    /// Reference RTTM file
    #[arg(long = "ref", value_name = "RTTM", required_unless_present = "serve")]
    reference: Option<PathBuf>,

    /// Hypothesis RTTM file
    #[arg(long = "hyp", value_name = "RTTM", required_unless_present = "serve")]
    hypothesis: Option<PathBuf>,

    /// UEM file (default: span of reference and hypothesis turns)
    #[arg(long, value_name = "UEM")]
    uem: Option<PathBuf>,

    /// Region mode: all, single, nonoverlap or overlap
    #[arg(long, value_name = "MODE")]
    regions: Option<String>,

    /// Collar in seconds around each reference boundary
    #[arg(long, value_name = "SECS")]
    collar: Option<f64>,

    /// JSON scoring config (flags override it)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a row per recording
    #[arg(long)]
    per_file: bool,

    /// Output the full report as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = DEFAULT_ADDR)]
    addr: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match load_config(&args) {
        Ok(config) if args.serve => run_serve(&args, config).await,
        Ok(config) => run_score(&args, config),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error[{}]: {}", e.code(), e);
        std::process::exit(1);
    }
}

/// Logs go to stderr, stdout is for results. RUST_LOG wins over --verbose.
fn init_tracing(verbose: bool) {
    let default = if verbose { "spyder=debug" } else { "spyder=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file first, then flags on top
fn load_config(args: &Args) -> DerResult<ScoringConfig> {
    let mut config = match &args.config {
        Some(path) => ScoringConfig::from_file(path)?,
        None => ScoringConfig::default(),
    };
    if let Some(mode) = &args.regions {
        config.regions = mode.parse::<RegionMode>()?;
    }
    if let Some(collar) = args.collar {
        config.collar = collar;
    }
    config.validate()?;
    debug!(regions = %config.regions, collar = config.collar, "scoring config");
    Ok(config)
}

/// Score files and print the report
fn run_score(args: &Args, config: ScoringConfig) -> DerResult<()> {
    let (Some(ref_path), Some(hyp_path)) = (&args.reference, &args.hypothesis) else {
        return Err(DerError::Config("--ref and --hyp are required".to_string()));
    };

    let reference = load_rttm(ref_path)?;
    let hypothesis = load_rttm(hyp_path)?;
    let uem = args.uem.as_ref().map(load_uem).transpose()?;

    let report = score_corpus(&reference, &hypothesis, uem.as_ref(), &config)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| DerError::Config(format!("cannot serialize report: {}", e)))?;
        println!("{}", json);
    } else {
        print_report(&report, args.per_file, args.no_color);
    }
    Ok(())
}

/// Print the table (or parseable lines with --no-color)
fn print_report(report: &CorpusReport, per_file: bool, no_color: bool) {
    let row = |name: &str, metrics: &Metrics| {
        if no_color {
            metrics.to_parseable_string(name)
        } else {
            metrics.to_terminal_string(name)
        }
    };

    if !no_color {
        println!("{}", Metrics::table_header());
    }
    if per_file {
        for (file, metrics) in &report.per_file {
            println!("{}", row(file, metrics));
        }
    }
    println!("{}", row("Overall", &report.overall));
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: ScoringConfig) -> DerResult<()> {
    run_server(&args.addr, config)
        .await
        .map_err(|e| DerError::Io {
            path: args.addr.clone(),
            message: e.to_string(),
        })
}
