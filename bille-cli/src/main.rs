use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bille_core::EligibilitySession;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use bille_cli::{config, interactive, logging, render, replay};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Pharmacy billing eligibility assistant.
///
/// Walks a case through Ryan White certification, insurance, FPL and drug
/// questions and prints the payer order to bill.
#[derive(Debug, Parser)]
#[command(name = "bill-e", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// TOML file overriding the eligibility thresholds.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Append a plain-text copy of every log record to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `bille_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Silence console logging. File logging is unaffected.
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Answer the questions one at a time (default).
    Interactive,

    /// Apply a `field,value` CSV script and print the resulting panels.
    Replay {
        /// Path to the CSV script.
        file: PathBuf,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
        debug!(path = %path.display(), "file logging enabled");
    }

    let rules = config::load_rules(cli.rules.as_deref()).context("Failed to load eligibility rules")?;
    let mut session = EligibilitySession::new(rules).context("Invalid eligibility rules")?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            info!("starting interactive session");
            let stdin = io::stdin();
            let mut stdout = io::stdout().lock();
            interactive::run(&mut session, stdin.lock(), &mut stdout)
                .context("Interactive session failed")?;
        }
        Command::Replay { file } => {
            let steps = replay::load_from_file(&file)
                .with_context(|| format!("Failed to load replay script: {}", file.display()))?;
            replay::run(&mut session, &steps)
                .with_context(|| format!("Replay stopped: {}", file.display()))?;
            print!("{}", render::session(&session));
        }
    }

    Ok(())
}
