//! Parses a human-typed line into an action the engine can submit.
//!
//! The engine's [`PlayerAction`](axiomind_engine::player::PlayerAction) carries
//! the acting seat, which isn't known until the caller attaches it — this
//! module only resolves the *kind* and *amount* the player typed.

use axiomind_engine::player::ActionKind;

/// What a prospective bet/raise amount is denominated in: whole chips, as
/// typed by the player (converted to minor units by the caller via `Chips::from_major`).
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// A parsed action kind, with a chip amount (major units) for Bet/Raise.
    Action { kind: ActionKind, amount: Option<i64> },
    /// User entered a quit command (q or quit).
    Quit,
    /// Input could not be parsed.
    Invalid(String),
}

/// Parse user input string into an action kind or a special command.
///
/// Accepts the following input formats (case-insensitive):
/// - "f" or "fold" -> Fold
/// - "c" or "check" -> Check
/// - "call" -> Call
/// - "bet X" -> Bet with amount X (major chips)
/// - "raise X" -> Raise with amount X (major chips)
/// - "allin" or "all-in" -> AllIn
/// - "q" or "quit" -> Quit command
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    if parts[0] == "q" || parts[0] == "quit" {
        return ParseResult::Quit;
    }

    match parts[0] {
        "fold" | "f" => ParseResult::Action {
            kind: ActionKind::Fold,
            amount: None,
        },
        "check" | "c" => ParseResult::Action {
            kind: ActionKind::Check,
            amount: None,
        },
        "call" => ParseResult::Action {
            kind: ActionKind::Call,
            amount: None,
        },
        "allin" | "all-in" => ParseResult::Action {
            kind: ActionKind::AllIn,
            amount: None,
        },
        "bet" => parse_amount(&parts, "Bet", ActionKind::Bet),
        "raise" => parse_amount(&parts, "Raise", ActionKind::Raise),
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, bet <amount>, raise <amount>, allin, q",
            parts[0]
        )),
    }
}

fn parse_amount(parts: &[&str], label: &str, kind: ActionKind) -> ParseResult {
    if parts.len() < 2 {
        return ParseResult::Invalid(format!(
            "{} requires an amount (e.g., '{} 100')",
            label,
            label.to_lowercase()
        ));
    }
    match parts[1].parse::<i64>() {
        Ok(amount) if amount > 0 => ParseResult::Action {
            kind,
            amount: Some(amount),
        },
        Ok(_) => ParseResult::Invalid(format!("{} amount must be positive", label)),
        Err(_) => ParseResult::Invalid(format!("Invalid {} amount", label.to_lowercase())),
    }
}
