//! Ladders CLI - play, inspect, simulate and replay Snakes & Ladders matches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Ladders - a deterministic Snakes & Ladders engine
#[derive(Parser, Debug)]
#[command(name = "ladders")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verbose logging (-v info, -vv debug, -vvv trace; RUST_LOG also works)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a match; every seat rolls automatically unless --interactive
    Play {
        #[command(flatten)]
        setup: cli::MatchArgs,

        /// Dice seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum rolls before giving up (default: 10000)
        #[arg(short = 't', long, default_value = "10000")]
        max_turns: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save a replayable recording to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Continue a match from a snapshot file
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Write a snapshot of the final match state to file
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Human seats press Enter to roll
        #[arg(short, long)]
        interactive: bool,
    },

    /// Build a board and print its hazards
    Board {
        #[command(flatten)]
        setup: cli::MatchArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run mass parallel matches and aggregate statistics
    Simulate {
        #[command(flatten)]
        setup: cli::MatchArgs,

        /// Number of matches to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum rolls per match (default: 10000)
        #[arg(short = 't', long, default_value = "10000")]
        max_turns: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Replay a recorded match
    Replay {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: PathBuf,

        /// Stop after this many rolls (default: all)
        #[arg(long)]
        step: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Play {
            setup,
            seed,
            max_turns,
            format,
            save,
            resume,
            snapshot,
            interactive,
        } => cli::play::execute(cli::play::PlayOptions {
            setup,
            seed,
            max_turns,
            format,
            save,
            resume,
            snapshot,
            interactive,
        }),

        Commands::Board { setup, format } => cli::board::execute(&setup, format),

        Commands::Simulate {
            setup,
            games,
            seed,
            threads,
            max_turns,
            format,
            progress,
        } => cli::simulate::execute(&setup, games, seed, threads, max_turns, format, progress),

        Commands::Replay {
            recording,
            step,
            format,
        } => cli::replay::execute(&recording, step, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
