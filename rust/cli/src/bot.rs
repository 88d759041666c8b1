//! Built-in scripted opponents.
//!
//! `play`/`eval`/`sim`/`bench`/`verify` all need something to drive the
//! seats nobody is typing for. These are fixed policies over
//! [`LegalAction`], not a pluggable strategy trait — good enough to push a
//! hand to completion without a human at the keyboard.

use std::str::FromStr;

use axiomind_engine::engine::LegalAction;
use axiomind_engine::money::Chips;
use axiomind_engine::player::{ActionKind, PlayerAction, Seat};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Checks or calls whenever possible, folds otherwise. Never bets or raises.
    Passive,
    /// Picks uniformly among the currently legal actions.
    Random,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "passive" | "baseline" => Ok(Strategy::Passive),
            "random" => Ok(Strategy::Random),
            other => Err(format!(
                "unknown strategy '{other}', expected 'passive' or 'random'"
            )),
        }
    }
}

/// Maps a `--level` value (1..=20) onto a built-in strategy: the low half
/// plays passively, the high half plays randomly.
pub fn strategy_for_level(level: u8) -> Strategy {
    if level <= 10 {
        Strategy::Passive
    } else {
        Strategy::Random
    }
}

pub fn choose(strategy: Strategy, seat: Seat, legal: &[LegalAction], rng: &mut impl Rng) -> PlayerAction {
    match strategy {
        Strategy::Passive => passive_choice(seat, legal),
        Strategy::Random => random_choice(seat, legal, rng),
    }
}

fn passive_choice(seat: Seat, legal: &[LegalAction]) -> PlayerAction {
    for action in legal {
        match action {
            LegalAction::Check => return PlayerAction::new(seat, ActionKind::Check, None),
            LegalAction::Call { .. } => return PlayerAction::new(seat, ActionKind::Call, None),
            _ => {}
        }
    }
    PlayerAction::new(seat, ActionKind::Fold, None)
}

fn random_choice(seat: Seat, legal: &[LegalAction], rng: &mut impl Rng) -> PlayerAction {
    let idx = rng.gen_range(0..legal.len());
    match legal[idx] {
        LegalAction::Fold => PlayerAction::new(seat, ActionKind::Fold, None),
        LegalAction::Check => PlayerAction::new(seat, ActionKind::Check, None),
        LegalAction::Call { .. } => PlayerAction::new(seat, ActionKind::Call, None),
        LegalAction::Bet { min, max } => {
            PlayerAction::new(seat, ActionKind::Bet, Some(random_between(rng, min, max)))
        }
        LegalAction::Raise { min_total, max_total } => PlayerAction::new(
            seat,
            ActionKind::Raise,
            Some(random_between(rng, min_total, max_total)),
        ),
        LegalAction::AllIn { amount } => PlayerAction::new(seat, ActionKind::AllIn, Some(amount)),
    }
}

fn random_between(rng: &mut impl Rng, min: Chips, max: Chips) -> Chips {
    if min.minor() >= max.minor() {
        return max;
    }
    Chips::from_minor(rng.gen_range(min.minor()..=max.minor()))
}
