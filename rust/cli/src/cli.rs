//! Command-line surface: argument parsing only, no behavior.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "axiomind", version, about = "Operator CLI for the cash-game engine")]
pub struct AxiomindCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Vs {
    Ai,
    Human,
}

impl Vs {
    pub fn as_str(self) -> &'static str {
        match self {
            Vs::Ai => "ai",
            Vs::Human => "human",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the resolved configuration and where each value came from.
    Cfg,
    /// Run environment sanity checks (data directory, locale, deck determinism).
    Doctor,
    /// Print a handful of raw shuffled cards to sanity-check the RNG.
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Deal and show one hand heads-up, including the evaluated winner.
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the fixed evaluator micro-benchmark and report hands/sec.
    Bench,
    /// Play an interactive heads-up session from the terminal.
    Play {
        #[arg(long, value_enum, default_value = "ai")]
        vs: Vs,
        #[arg(long)]
        hands: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=20))]
        level: Option<u8>,
    },
    /// Pit two named strategies against each other and report the results.
    Eval {
        #[arg(long, default_value = "random")]
        strategy_a: String,
        #[arg(long, default_value = "passive")]
        strategy_b: String,
        #[arg(long, default_value_t = 100)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a large batch of bot-only hands, optionally resuming a saved run.
    Sim {
        #[arg(long, default_value_t = 1000)]
        hands: u64,
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=20))]
        level: Option<u8>,
        #[arg(long)]
        resume: bool,
    },
    /// Run bot-only hands and assert chip-conservation invariants hold.
    Verify {
        #[arg(long, default_value_t = 500)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
    },
}
