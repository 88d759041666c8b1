//! # Axiomind CLI Library
//!
//! Command-line interface for the Axiomind poker engine.
//!
//! ## Module Organization
//!
//! - **`cli`**: CLI structures (AxiomindCli, Commands enum)
//! - **`commands`**: Command handler implementations
//! - **`formatters`**: Card/board/action formatting
//! - **`io_utils`**: File I/O helpers
//! - **`validation`**: Input parsing and validation
//! - **`config`**, **`error`**, **`ui`**: Support modules
//!
//! ## Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["axiomind", "play", "--vs", "ai", "--hands", "10"];
//! let code = axiomind_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Commands
//!
//! `cfg`, `doctor`, `rng`, `deal`, `bench`, `play`, `eval`, `sim`, `verify`

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

// Import CLI types from cli module
use cli::{AxiomindCli, Commands};

// Import utility functions from extracted modules
use commands::{
    handle_bench_command, handle_cfg_command, handle_deal_command, handle_doctor_command,
    handle_eval_command, handle_play_command, handle_rng_command, handle_sim_command,
    handle_verify_command,
};

// Re-exports
pub use cli::Vs;
pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions (Ctrl+C)
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["axiomind", "deal", "--seed", "42"];
/// let code = axiomind_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = AxiomindCli::try_parse_from(&argv);
    match parsed {
        Err(e) => handle_parse_error(e, out, err),
        Ok(cli) => execute_command(cli.cmd, out, err),
    }
}

/// Handle clap parsing errors with appropriate output and exit codes.
fn handle_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(out, "{}", e);
            0
        }
        _ => {
            const COMMANDS: &[&str] = &[
                "cfg", "doctor", "rng", "deal", "bench", "play", "eval", "sim", "verify",
            ];

            let _ = writeln!(err, "{}", e);
            let _ = writeln!(err);
            let _ = writeln!(err, "Axiomind Poker CLI");
            let _ = writeln!(err, "Usage: axiomind <command> [options]\n");
            let _ = writeln!(err, "Commands:");
            for c in COMMANDS {
                let _ = writeln!(err, "  {}", c);
            }
            let _ = writeln!(err, "\nFor full help, run: axiomind --help");
            2
        }
    }
}

/// Execute the parsed command and convert the result to an exit code.
fn execute_command(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    let result = match cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Doctor => handle_doctor_command(out, err),
        Commands::Rng { seed } => handle_rng_command(seed, out),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Bench => handle_bench_command(out),
        Commands::Play {
            vs,
            hands,
            seed,
            level,
        } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(vs, hands, seed, level, out, err, &mut stdin_lock)
        }
        Commands::Eval {
            strategy_a,
            strategy_b,
            hands,
            seed,
        } => handle_eval_command(&strategy_a, &strategy_b, hands, seed, out),
        Commands::Sim {
            hands,
            output,
            seed,
            level,
            resume,
        } => handle_sim_command(hands, output, seed, level, resume, out, err),
        Commands::Verify { hands, seed } => handle_verify_command(hands, seed, out, err),
    };

    match result {
        Ok(()) => 0,
        Err(CliError::Interrupted(_)) => 130,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            2
        }
    }
}
