//! Verify command handler module.
//!
//! Runs a batch of bot-only hands at a live table and asserts that chip
//! conservation holds for every one of them: whatever the table's stacks
//! summed to before a hand must equal what they sum to afterward, once the
//! rake taken on that hand is added back in. Any settlement that breaks this
//! invariant, or a hand the engine aborts, is reported as a failure.

use crate::bot::{self, Strategy};
use crate::config;
use crate::error::CliError;
use axiomind_engine::engine::{HandEngine, HandOutcome};
use axiomind_engine::money::Chips;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;

/// Handle the verify command: play `hands` bot-only hands at a table seeded
/// from the resolved configuration, and confirm chip conservation holds
/// after every settlement.
///
/// # Returns
///
/// `Ok(())` if every hand conserves chips, `Err(CliError::Engine)` naming
/// the first hand that doesn't (or that the engine aborted).
pub fn handle_verify_command(
    hands: u64,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        writeln!(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;
    let cfg = resolved.config;
    let table_config = cfg.table_config()?;
    let starting_stack = Chips::from_major(cfg.starting_stack as i64);
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let strategy = bot::strategy_for_level(cfg.level);

    let mut engine = HandEngine::new("verify", table_config);
    for seat in 1..=cfg.max_seats {
        engine.attach(seat, starting_stack)?;
    }
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let mut checked = 0u64;
    for i in 0..hands {
        if engine.start_hand(i).is_err() {
            top_up_all_seats(&mut engine, cfg.max_seats, starting_stack)?;
            engine.start_hand(i)?;
        }
        let starting_total = total_stacks(&engine);

        let settlement = loop {
            let Some(actor) = engine.snapshot(None).actor_seat else {
                break None;
            };
            let legal = engine.valid_actions(actor);
            let action = bot::choose(strategy, actor, &legal, &mut rng);
            match engine.submit(action, i)? {
                HandOutcome::Continues => continue,
                HandOutcome::HandEnded(settlement) => break Some(settlement),
            }
        };

        let Some(settlement) = settlement else {
            continue;
        };
        if settlement.aborted {
            return Err(CliError::Engine(format!("hand {} was aborted by the engine", i)));
        }

        let stacks_after = total_stacks(&engine);
        let conserved = stacks_after + settlement.rake == starting_total;
        if !conserved {
            return Err(CliError::Engine(format!(
                "hand {} broke chip conservation: {} chips at hand start, {} after + {} rake",
                i,
                starting_total.to_major_f64(),
                stacks_after.to_major_f64(),
                settlement.rake.to_major_f64(),
            )));
        }
        checked += 1;
    }

    writeln!(out, "Verified {} hands (seed {}): chip conservation holds", checked, seed)?;
    Ok(())
}

fn total_stacks(engine: &HandEngine) -> Chips {
    let snapshot = engine.snapshot(None);
    snapshot
        .players
        .iter()
        .fold(Chips::ZERO, |acc, seat| acc + seat.stack + seat.current_bet)
}

fn top_up_all_seats(engine: &mut HandEngine, max_seats: u8, stack: Chips) -> Result<(), CliError> {
    for seat in 1..=max_seats {
        let _ = engine.detach(seat);
        engine.attach(seat, stack)?;
    }
    Ok(())
}
