use crate::money::Chips;
use thiserror::Error;

/// Errors returned by [`crate::engine::HandEngine`] operations.
///
/// Client-facing variants (`IllegalAction`, `NotYourTurn`, `NoHandInProgress`,
/// `SeatUnknown`, `AmountOutOfBounds`) are recoverable and never mutate
/// state. `Invariant` signals a bug and drives an abort-settlement.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GameError {
    #[error("not enough cards remain in the deck")]
    NotEnoughCards,

    #[error("action `{action}` is illegal: {reason}")]
    IllegalAction { action: &'static str, reason: String },

    #[error("it is not seat {actual}'s turn, expected seat {expected}")]
    NotYourTurn { expected: u8, actual: u8 },

    #[error("no hand is in progress at this table")]
    NoHandInProgress,

    #[error("a hand is already in progress")]
    HandInProgress,

    #[error("seat {0} is unknown at this table")]
    SeatUnknown(u8),

    #[error("seat {0} is already occupied")]
    SeatTaken(u8),

    #[error("seat {seat} is out of range 1..={max_seats}")]
    SeatOutOfRange { seat: u8, max_seats: u8 },

    #[error("not enough players with chips to start a hand")]
    NotEnoughPlayers,

    #[error("amount {amount} is out of bounds [{min}, {max}]")]
    AmountOutOfBounds {
        amount: Chips,
        min: Chips,
        max: Chips,
    },

    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

impl GameError {
    pub fn illegal(action: &'static str, reason: impl Into<String>) -> GameError {
        GameError::IllegalAction {
            action,
            reason: reason.into(),
        }
    }

    /// Whether this error should drive an `AbortSettlement` rather than
    /// simply being reported to the submitter without a state change.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, GameError::Invariant(_))
    }
}
