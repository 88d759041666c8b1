//! Strategy evaluation command.
//!
//! Pits two built-in bot strategies against each other heads-up across many
//! independent hands and reports win rates.

use crate::bot::{self, Strategy};
use crate::config;
use crate::error::CliError;
use axiomind_engine::engine::{HandEngine, HandOutcome};
use axiomind_engine::money::Chips;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::str::FromStr;

const SEAT_A: u8 = 1;
const SEAT_B: u8 = 2;

/// Handle the eval command: run `hands` independent heads-up hands between
/// `strategy_a` (seat 1) and `strategy_b` (seat 2), reporting win rates.
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(CliError::InvalidInput)` if either strategy name is unrecognized
pub fn handle_eval_command(
    strategy_a: &str,
    strategy_b: &str,
    hands: u64,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let strategy_a = Strategy::from_str(strategy_a).map_err(CliError::InvalidInput)?;
    let strategy_b = Strategy::from_str(strategy_b).map_err(CliError::InvalidInput)?;

    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;
    let table_config = resolved.config.table_config()?;
    let starting_stack = Chips::from_major(resolved.config.starting_stack as i64);
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let mut wins_a = 0u64;
    let mut wins_b = 0u64;
    let mut ties = 0u64;
    let mut total_rake = Chips::ZERO;

    for hand_index in 0..hands {
        let mut engine = HandEngine::new("eval", table_config);
        engine.attach(SEAT_A, starting_stack)?;
        engine.attach(SEAT_B, starting_stack)?;
        engine.start_hand(hand_index)?;

        let settlement = loop {
            let Some(actor) = engine.snapshot(None).actor_seat else {
                break None;
            };
            let legal = engine.valid_actions(actor);
            let strategy = if actor == SEAT_A { strategy_a } else { strategy_b };
            let action = bot::choose(strategy, actor, &legal, &mut rng);
            match engine.submit(action, hand_index)? {
                HandOutcome::Continues => continue,
                HandOutcome::HandEnded(settlement) => break Some(settlement),
            }
        };

        let Some(settlement) = settlement else {
            continue;
        };
        total_rake += settlement.rake;
        let won_a = settlement
            .winners
            .iter()
            .find(|w| w.seat == SEAT_A)
            .map(|w| w.amount)
            .unwrap_or(Chips::ZERO);
        let won_b = settlement
            .winners
            .iter()
            .find(|w| w.seat == SEAT_B)
            .map(|w| w.amount)
            .unwrap_or(Chips::ZERO);
        match won_a.minor().cmp(&won_b.minor()) {
            std::cmp::Ordering::Greater => wins_a += 1,
            std::cmp::Ordering::Less => wins_b += 1,
            std::cmp::Ordering::Equal => ties += 1,
        }
    }

    let report = serde_json::json!({
        "hands": hands,
        "seed": seed,
        "strategy_a": format!("{:?}", strategy_a).to_lowercase(),
        "strategy_b": format!("{:?}", strategy_b).to_lowercase(),
        "wins_a": wins_a,
        "wins_b": wins_b,
        "ties": ties,
        "win_rate_a": wins_a as f64 / hands.max(1) as f64,
        "win_rate_b": wins_b as f64 / hands.max(1) as f64,
        "total_rake": total_rake.to_major_f64(),
    });
    let json_str = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
