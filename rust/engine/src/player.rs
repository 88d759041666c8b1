use crate::cards::Card;
use crate::money::Chips;
use serde::{Deserialize, Serialize};

pub type Seat = u8;

/// A seat's status within the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
    SittingOut,
}

/// The kind of action a client submits for the current actor.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

/// A submitted action record: `{seat, kind, amount?}`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerAction {
    pub seat: Seat,
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Chips>,
}

impl PlayerAction {
    pub fn new(seat: Seat, kind: ActionKind, amount: Option<Chips>) -> PlayerAction {
        PlayerAction { seat, kind, amount }
    }
}

/// Per-seat state within a hand: stack, hole cards, status, current bet.
#[derive(Debug, Clone)]
pub struct PlayerRecord {
    seat: Seat,
    stack: Chips,
    hole_cards: Vec<Card>,
    status: PlayerStatus,
    current_bet: Chips,
    total_bet_this_hand: Chips,
}

impl PlayerRecord {
    pub fn new(seat: Seat, stack: Chips) -> Self {
        Self {
            seat,
            stack,
            hole_cards: Vec::new(),
            status: PlayerStatus::Active,
            current_bet: Chips::ZERO,
            total_bet_this_hand: Chips::ZERO,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn total_bet_this_hand(&self) -> Chips {
        self.total_bet_this_hand
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole_cards
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
    }

    pub fn deal_hole_card(&mut self, card: Card) {
        self.hole_cards.push(card);
    }

    /// Puts chips into the pot. Returns the actual amount committed, which
    /// is capped at the remaining stack; the seat goes ALL_IN if that
    /// empties its stack.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let actual = amount.min(self.stack);
        self.stack -= actual;
        self.current_bet += actual;
        self.total_bet_this_hand += actual;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        actual
    }

    pub fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
        self.hole_cards.clear();
    }

    pub fn credit(&mut self, amount: Chips) {
        self.stack += amount;
    }

    pub fn reset_for_new_round(&mut self) {
        self.current_bet = Chips::ZERO;
    }

    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards.clear();
        if self.status != PlayerStatus::SittingOut {
            self.status = PlayerStatus::Active;
        }
        self.current_bet = Chips::ZERO;
        self.total_bet_this_hand = Chips::ZERO;
    }
}
