//! Structured hand-lifecycle event types.
//!
//! These are not persisted by this crate (hand-history export is out of
//! scope); they exist so the web layer can attach consistent fields to
//! `tracing` events as a hand progresses.

use serde::{Deserialize, Serialize};

use crate::engine::Street;
use crate::player::{PlayerAction, Seat};

/// One submitted action, tagged with the seat and street it happened on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: Seat,
    pub street: Street,
    pub action: PlayerAction,
}

impl ActionRecord {
    pub fn new(seat: Seat, street: Street, action: PlayerAction) -> Self {
        Self { seat, street, action }
    }
}

/// Winners and board at the close of a hand, for a single `tracing` event.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winners: Vec<Seat>,
    #[serde(default)]
    pub notes: Option<String>,
}
