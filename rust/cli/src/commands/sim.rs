//! Simulation command handler for large-scale bot-only hand generation.
//!
//! Runs a target number of hands at a multi-seat table, restarting busted
//! seats between hands so the table never runs dry, and optionally persists
//! a JSON run summary that a later invocation can resume from.
//!
//! Resuming only carries forward the hand count and accumulated rake from
//! the prior summary file — it does not replay the prior run's RNG state,
//! so a resumed run's individual hands are not bit-for-bit reproducible
//! against an equivalent single uninterrupted run with the same seed.

use crate::bot::{self, Strategy};
use crate::config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use axiomind_engine::engine::{HandEngine, HandOutcome};
use axiomind_engine::money::Chips;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SimSummary {
    hands_completed: u64,
    total_rake_major: f64,
    seed: u64,
    elapsed_ms: u128,
}

/// Handle the sim command: run `hands` bot-only hands, reporting throughput
/// and optionally persisting/resuming a JSON summary.
///
/// # Returns
///
/// `Ok(())` on success, or `CliError` on failure.
pub fn handle_sim_command(
    hands: u64,
    output: Option<String>,
    seed: Option<u64>,
    level: Option<u8>,
    resume: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;
    let cfg = resolved.config;
    let level = level.unwrap_or(cfg.level).clamp(1, 20);
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let table_config = cfg.table_config()?;
    let starting_stack = Chips::from_major(cfg.starting_stack as i64);
    let strategy = bot::strategy_for_level(level);

    let output_path = output.map(std::path::PathBuf::from);

    let mut already_completed = 0u64;
    let mut carried_rake_major = 0.0f64;
    if resume {
        if let Some(path) = &output_path {
            if let Some(prior) = read_summary(path) {
                already_completed = prior.hands_completed;
                carried_rake_major = prior.total_rake_major;
                writeln!(out, "Resuming from {} completed hands", already_completed)?;
            }
        }
    }

    let remaining = hands.saturating_sub(already_completed);
    let start = std::time::Instant::now();

    let mut engine = HandEngine::new("sim", table_config);
    for seat in 1..=cfg.max_seats {
        engine.attach(seat, starting_stack)?;
    }
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut hands_completed = 0u64;
    let mut total_rake = Chips::ZERO;

    for i in 0..remaining {
        if engine.start_hand(i).is_err() {
            top_up_all_seats(&mut engine, cfg.max_seats, starting_stack)?;
            engine.start_hand(i)?;
        }

        loop {
            let Some(actor) = engine.snapshot(None).actor_seat else {
                break;
            };
            let legal = engine.valid_actions(actor);
            let action = bot::choose(strategy, actor, &legal, &mut rng);
            match engine.submit(action, i)? {
                HandOutcome::Continues => {}
                HandOutcome::HandEnded(settlement) => {
                    total_rake += settlement.rake;
                    break;
                }
            }
        }
        hands_completed += 1;
    }

    let elapsed = start.elapsed();
    let grand_total = already_completed + hands_completed;
    let grand_rake_major = carried_rake_major + total_rake.to_major_f64();

    writeln!(
        out,
        "Simulated {} hands ({} this run) in {:?}",
        grand_total, hands_completed, elapsed
    )?;
    writeln!(out, "Total rake: {:.4}", grand_rake_major)?;

    if let Some(path) = &output_path {
        ensure_parent_dir(path).map_err(CliError::Config)?;
        let summary = SimSummary {
            hands_completed: grand_total,
            total_rake_major: grand_rake_major,
            seed,
            elapsed_ms: elapsed.as_millis(),
        };
        let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
    }

    Ok(())
}

fn top_up_all_seats(engine: &mut HandEngine, max_seats: u8, stack: Chips) -> Result<(), CliError> {
    for seat in 1..=max_seats {
        let _ = engine.detach(seat);
        engine.attach(seat, stack)?;
    }
    Ok(())
}

fn read_summary(path: &Path) -> Option<SimSummary> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}
