//! skytalk CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use skytalk_foundation::{BoundaryPolicy, ConsoleConfig, ParserConfig};
use skytalk_runtime::Repl;
use tracing_subscriber::EnvFilter;

/// Boundary rule for the numeric validators.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// Refuse only out-of-range values typed at the canonical width.
    Legacy,
    /// Accept exactly the in-range values.
    Range,
    /// Accept in-range values typed at the canonical width.
    Strict,
}

impl From<Policy> for BoundaryPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Legacy => Self::Legacy,
            Policy::Range => Self::RangeOnly,
            Policy::Strict => Self::RangeAndWidth,
        }
    }
}

/// Air-traffic operator console.
#[derive(Debug, Parser)]
#[command(name = "skytalk", version, about)]
struct Cli {
    /// Scripts to run before the interactive session, one transmission per line.
    files: Vec<PathBuf>,

    /// Exit after running the scripts instead of starting the console.
    #[arg(short, long)]
    batch: bool,

    /// Callsign echoed in front of the operator's own transmissions.
    #[arg(long, default_value = "TOWER")]
    callsign: String,

    /// Seed for the radio replies.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Transcript lines kept on screen.
    #[arg(long, default_value_t = 5)]
    transcript_lines: usize,

    /// Bound the command history to this many entries.
    #[arg(long)]
    history: Option<usize>,

    /// Boundary rule for headings.
    #[arg(long, value_enum, default_value_t = Policy::Legacy)]
    heading_policy: Policy,

    /// Boundary rule for altitudes.
    #[arg(long, value_enum, default_value_t = Policy::Range)]
    altitude_policy: Policy,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Do not print the welcome banner.
    #[arg(long)]
    no_banner: bool,

    /// Print the transcript without ANSI colours.
    #[arg(long)]
    no_colour: bool,
}

impl Cli {
    fn console_config(&self) -> ConsoleConfig {
        let parser = ParserConfig::new()
            .with_heading_policy(self.heading_policy.into())
            .with_altitude_policy(self.altitude_policy.into());
        ConsoleConfig::default()
            .with_parser(parser)
            .with_callsign(&self.callsign)
            .with_seed(self.seed)
            .with_transcript_capacity(self.transcript_lines)
            .with_history_capacity(self.history)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut repl = Repl::new(cli.console_config())?;
    if cli.no_colour {
        repl = repl.without_colour();
    }

    for file in &cli.files {
        if !repl.eval_file(file)? {
            return Ok(());
        }
    }

    if cli.batch {
        return Ok(());
    }

    // Scripts already set the scene
    if cli.no_banner || !cli.files.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}
