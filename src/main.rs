//! Frontline CLI - plays Planet Wars over stdin/stdout.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Frontline - a Planet Wars bot
///
/// Without a subcommand, plays one match: game state is read from stdin
/// and orders are written to stdout.
#[derive(Parser, Debug)]
#[command(name = "frontline")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    policy: cli::PolicyArgs,

    /// Write a `#` comment with the order count before each end-turn
    #[arg(long)]
    annotate: bool,

    /// Log filter for stderr (e.g. "debug", "frontline=trace")
    #[arg(long, global = true)]
    log: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded engine transcript and print each turn's decisions
    Inspect {
        /// Transcript file (engine output: settings followed by turns)
        #[arg(required = true)]
        transcript: PathBuf,

        #[command(flatten)]
        policy: cli::PolicyArgs,
    },

    /// Validate an oracle model file
    Validate {
        /// Oracle file to validate
        #[arg(required = true)]
        oracle: PathBuf,
    },
}

/// Install the stderr log subscriber. Stdout is reserved for the protocol.
fn init_tracing(directives: Option<&str>) {
    let filter = match directives {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    let result = match args.command {
        None => cli::play::execute(&args.policy, args.annotate),
        Some(Commands::Inspect { transcript, policy }) => cli::inspect::execute(&transcript, &policy),
        Some(Commands::Validate { oracle }) => cli::validate::execute(&oracle),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
