//! # Play Command
//!
//! Interactive poker gameplay against a built-in bot or a second human at the
//! same terminal.
//!
//! - **vs=ai**: seat 1 is the human, seat 2 is driven by a bot strategy
//!   picked from `--level` (see [`crate::bot::strategy_for_level`]).
//! - **vs=human**: both seats are prompted from stdin, in turn.

use crate::bot::{self, Strategy};
use crate::cli::Vs;
use crate::config;
use crate::error::CliError;
use crate::formatters::format_action;
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{parse_player_action, ParseResult};
use axiomind_engine::engine::{HandEngine, HandOutcome};
use axiomind_engine::money::Chips;
use axiomind_engine::player::{ActionKind, PlayerAction, Seat};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::{BufRead, Write};

const HUMAN_SEAT: Seat = 1;
const OPPONENT_SEAT: Seat = 2;

/// Handle the play command: interactive poker gameplay.
///
/// # Returns
///
/// * `Ok(())` on successful completion (including a user-requested quit)
/// * `Err(CliError)` if `hands` is 0, configuration is invalid, or I/O fails
pub fn handle_play_command(
    vs: Vs,
    hands: Option<u64>,
    seed: Option<u64>,
    level: Option<u8>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let hands = hands.unwrap_or(1);
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

    writeln!(out, "play: vs={} hands={} seed={}", vs.as_str(), hands, seed)?;
    writeln!(out, "Level: {}", level)?;

    if matches!(vs, Vs::Ai) {
        let strategy = bot::strategy_for_level(level);
        ui::display_warning(
            err,
            &format!("Seat {} is a built-in '{:?}' bot.", OPPONENT_SEAT, strategy),
        )?;
    }

    let mut engine = HandEngine::new("play", table_config);
    engine.attach(HUMAN_SEAT, starting_stack)?;
    engine.attach(OPPONENT_SEAT, starting_stack)?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let bot_strategy = bot::strategy_for_level(level);

    let mut played = 0u64;
    let mut quit_requested = false;

    for i in 1..=hands {
        if quit_requested {
            break;
        }
        if engine.snapshot(None).players.iter().any(|p| p.stack.is_zero()) {
            writeln!(out, "A seat is out of chips; session over.")?;
            break;
        }

        writeln!(out, "Hand {}", i)?;
        engine.start_hand(0)?;

        loop {
            let Some(actor) = engine.snapshot(None).actor_seat else {
                break;
            };
            let legal = engine.valid_actions(actor);
            let is_human_turn = actor == HUMAN_SEAT || matches!(vs, Vs::Human);

            let action = if is_human_turn {
                write!(out, "Seat {} action (check/call/bet N/raise N/fold/allin/q): ", actor)?;
                out.flush()?;
                match read_stdin_line(stdin) {
                    Some(input) => match parse_player_action(&input) {
                        ParseResult::Action { kind, amount } => {
                            PlayerAction::new(actor, kind, amount.map(Chips::from_major))
                        }
                        ParseResult::Quit => {
                            quit_requested = true;
                            break;
                        }
                        ParseResult::Invalid(msg) => {
                            ui::write_error(err, &msg)?;
                            continue;
                        }
                    },
                    None => {
                        quit_requested = true;
                        break;
                    }
                }
            } else {
                bot::choose(bot_strategy, actor, &legal, &mut rng)
            };

            match engine.submit(action, 0) {
                Ok(HandOutcome::Continues) => {
                    writeln!(out, "Seat {}: {}", actor, format_action(&action))?;
                    writeln!(out, "Pot: {}", engine.snapshot(None).pot)?;
                }
                Ok(HandOutcome::HandEnded(settlement)) => {
                    writeln!(out, "Seat {}: {}", actor, format_action(&action))?;
                    for winner in &settlement.winners {
                        writeln!(out, "Seat {} wins {}", winner.seat, winner.amount)?;
                    }
                    writeln!(out, "Hand complete. Rake: {}", settlement.rake)?;
                    break;
                }
                Err(e) => {
                    if is_human_turn {
                        ui::write_error(err, &format!("Invalid action: {}", e))?;
                        continue;
                    } else {
                        return Err(CliError::Engine(format!("bot submitted an illegal action: {}", e)));
                    }
                }
            }
        }
        played += 1;
    }

    writeln!(out, "Session hands={}", hands)?;
    writeln!(out, "Hands played: {} (completed)", played)?;
    Ok(())
}
