//! CLI frontend for the BrainBlitz training engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bb",
    about = "BrainBlitz — adaptive cognitive-training sessions",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulated session with a bot player
    Simulate {
        /// Game mode: classic or endless
        #[arg(short, long, default_value = "classic")]
        mode: String,

        /// Number of questions the bot attempts
        #[arg(short, long, default_value = "20")]
        questions: u32,

        /// RNG seed for deterministic runs
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Probability the bot answers correctly (0.0-1.0)
        #[arg(long, default_value = "0.9")]
        skill: f64,

        /// Profile file to load and persist
        #[arg(short, long, default_value = "bb-profile.json")]
        profile: PathBuf,

        /// Print every question and answer
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the persisted player profile
    Stats {
        /// Profile file to read
        #[arg(short, long, default_value = "bb-profile.json")]
        profile: PathBuf,
    },

    /// Delete the persisted player profile
    Reset {
        /// Profile file to delete
        #[arg(short, long, default_value = "bb-profile.json")]
        profile: PathBuf,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            mode,
            questions,
            seed,
            skill,
            profile,
            verbose,
        } => commands::simulate::run(&profile, &mode, questions, seed, skill, verbose),
        Commands::Stats { profile } => commands::stats::run(&profile),
        Commands::Reset { profile, yes } => commands::reset::run(&profile, yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
