//! The Hand Engine: owns one table's deck, seats, and pot, and drives a
//! single hand from `start_hand` through settlement. No I/O; callers pass
//! the current time explicitly so the engine stays a pure state machine.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{evaluate, HandRank};
use crate::money::Chips;
use crate::player::{ActionKind, PlayerAction, PlayerRecord, PlayerStatus, Seat};
use crate::pot::{Pot, PotManager};

/// The five stages of a hand. `Showdown` is transient: it never appears in
/// a live [`HandState`], only as a momentary step inside [`HandEngine::settle_showdown`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// Validated, per-table cash-game settings. `HandEngine` never guesses at
/// blinds or timeouts; they come from here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub rake_percent: u8,
    pub turn_timeout_seconds: u64,
    pub max_seats: u8,
}

impl TableConfig {
    pub fn new(
        small_blind: Chips,
        big_blind: Chips,
        rake_percent: u8,
        turn_timeout_seconds: u64,
        max_seats: u8,
    ) -> Result<Self, GameError> {
        if small_blind.is_zero() || small_blind.minor() < 0 {
            return Err(GameError::Invariant("small_blind must be positive".into()));
        }
        if big_blind < small_blind + small_blind {
            return Err(GameError::Invariant(
                "big_blind must be at least twice small_blind".into(),
            ));
        }
        if rake_percent > 100 {
            return Err(GameError::Invariant("rake_percent must be <= 100".into()));
        }
        if !(2..=10).contains(&max_seats) {
            return Err(GameError::Invariant("max_seats must be in 2..=10".into()));
        }
        Ok(Self {
            small_blind,
            big_blind,
            rake_percent,
            turn_timeout_seconds,
            max_seats,
        })
    }
}

/// The legal shape of an action a seat may currently submit, with amount
/// bounds where relevant.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalAction {
    Fold,
    Check,
    Call { amount: Chips },
    Bet { min: Chips, max: Chips },
    Raise { min_total: Chips, max_total: Chips },
    AllIn { amount: Chips },
}

#[derive(Debug, Clone, Serialize)]
pub struct PotSummary {
    pub amount: Chips,
    pub eligible: Vec<Seat>,
}

impl From<&Pot> for PotSummary {
    fn from(pot: &Pot) -> Self {
        PotSummary {
            amount: pot.amount,
            eligible: pot.eligible_seats.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WinnerShare {
    pub seat: Seat,
    pub amount: Chips,
    pub rank: Option<HandRank>,
    pub hole_cards: Vec<Card>,
}

/// Emitted exactly once per completed hand. The sole output external
/// collaborators persist.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementRecord {
    pub winners: Vec<WinnerShare>,
    pub pots: Vec<PotSummary>,
    pub rake: Chips,
    pub community_cards: Vec<Card>,
    pub aborted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub seat: Seat,
    pub stack: Chips,
    pub status: PlayerStatus,
    pub current_bet: Chips,
    pub cards: Vec<Card>,
}

/// The bit-stable state view returned to clients. Hole cards of other seats
/// are elided unless the street is showdown or the viewer owns the seat.
#[derive(Debug, Clone, Serialize)]
pub struct StateView {
    pub table_id: String,
    pub street: Option<Street>,
    pub community_cards: Vec<Card>,
    pub pot: Chips,
    pub pots: Vec<PotSummary>,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub actor_seat: Option<Seat>,
    pub turn_deadline_unix_ms: Option<u64>,
    pub players: Vec<SeatView>,
    pub hand_in_progress: bool,
}

/// The result of any engine call that mutates hand state: either the hand
/// keeps going, or it just ended and a settlement is ready to persist.
#[derive(Debug, Clone)]
pub enum HandOutcome {
    Continues,
    HandEnded(SettlementRecord),
}

#[derive(Debug, Clone)]
struct HandState {
    street: Street,
    community_cards: Vec<Card>,
    current_bet: Chips,
    min_raise: Chips,
    dealer_seat: Seat,
    actor_seat: Option<Seat>,
    participants: Vec<Seat>,
    acted_set: BTreeSet<Seat>,
    turn_deadline_unix_ms: u64,
    /// Whether a full raise (or an all-in meeting `min_raise`) is still
    /// outstanding on this bet level. A short all-in below `min_raise`
    /// clears this without clearing `acted_set`, so nobody — including
    /// seats still to act — gets a fresh raise option until the next
    /// full-sized bet or raise.
    reopened: bool,
}

/// Owns one table's hand in progress. Methods are synchronous; the only
/// suspending operation (broadcasting a [`StateView`] to connected seats)
/// lives one layer up, outside this crate.
#[derive(Debug)]
pub struct HandEngine {
    table_id: String,
    config: TableConfig,
    seats: BTreeMap<Seat, PlayerRecord>,
    deck: Deck,
    pot_manager: PotManager,
    dealer_seat: Option<Seat>,
    pending_detach: BTreeSet<Seat>,
    hand: Option<HandState>,
}

impl HandEngine {
    pub fn new(table_id: impl Into<String>, config: TableConfig) -> Self {
        Self::with_deck(table_id, config, Deck::new())
    }

    /// Test/replay-only constructor taking an explicit deck.
    pub fn with_deck(table_id: impl Into<String>, config: TableConfig, deck: Deck) -> Self {
        Self {
            table_id: table_id.into(),
            config,
            seats: BTreeMap::new(),
            deck,
            pot_manager: PotManager::new(),
            dealer_seat: None,
            pending_detach: BTreeSet::new(),
            hand: None,
        }
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn hand_in_progress(&self) -> bool {
        self.hand.is_some()
    }

    /// Unix-ms deadline for the current actor, if a hand is in progress and
    /// waiting on an action. Used by the per-table worker to re-arm its
    /// turn timer whenever the actor changes.
    pub fn turn_deadline(&self) -> Option<u64> {
        self.hand.as_ref().map(|h| h.turn_deadline_unix_ms)
    }

    /// All seats currently occupying the table (attached, regardless of
    /// hand-in-progress or sitting-out status), in ascending order.
    pub fn seat_numbers(&self) -> Vec<Seat> {
        self.seats.keys().copied().collect()
    }

    pub fn attach(&mut self, seat: Seat, stack: Chips) -> Result<(), GameError> {
        if seat == 0 || seat > self.config.max_seats {
            return Err(GameError::SeatOutOfRange {
                seat,
                max_seats: self.config.max_seats,
            });
        }
        if self.seats.contains_key(&seat) {
            return Err(GameError::SeatTaken(seat));
        }
        self.seats.insert(seat, PlayerRecord::new(seat, stack));
        Ok(())
    }

    /// Removes a seat and returns its stack. If a hand is in progress the
    /// seat is marked `SITTING_OUT` and queued; the actual removal (and the
    /// stack the caller gets back) happens once the current hand ends.
    pub fn detach(&mut self, seat: Seat) -> Result<Chips, GameError> {
        let player = self.seats.get_mut(&seat).ok_or(GameError::SeatUnknown(seat))?;
        if self.hand.is_some() {
            player.set_status(PlayerStatus::SittingOut);
            self.pending_detach.insert(seat);
            return Err(GameError::HandInProgress);
        }
        let player = self.seats.remove(&seat).expect("checked above");
        Ok(player.stack())
    }

    fn apply_pending_detaches(&mut self) {
        for seat in std::mem::take(&mut self.pending_detach) {
            self.seats.remove(&seat);
        }
    }

    fn advance_dealer(&mut self) -> Result<Seat, GameError> {
        let mut occupied: Vec<Seat> = self
            .seats
            .iter()
            .filter(|(_, p)| p.status() != PlayerStatus::SittingOut && !p.stack().is_zero())
            .map(|(&s, _)| s)
            .collect();
        occupied.sort_unstable();
        if occupied.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        let next = match self.dealer_seat {
            None => occupied[0],
            Some(current) => *occupied
                .iter()
                .find(|&&s| s > current)
                .unwrap_or(&occupied[0]),
        };
        self.dealer_seat = Some(next);
        Ok(next)
    }

    fn next_in_cycle(order: &[Seat], after: Seat) -> Seat {
        let pos = order.iter().position(|&s| s == after).unwrap_or(0);
        order[(pos + 1) % order.len()]
    }

    /// Starts a new hand. No-op (not an error) if one is already running.
    pub fn start_hand(&mut self, now_unix_ms: u64) -> Result<(), GameError> {
        if self.hand.is_some() {
            return Ok(());
        }
        self.apply_pending_detaches();

        let dealer = self.advance_dealer()?;

        let mut participants: Vec<Seat> = self
            .seats
            .iter()
            .filter(|(_, p)| p.status() != PlayerStatus::SittingOut && !p.stack().is_zero())
            .map(|(&s, _)| s)
            .collect();
        participants.sort_unstable();
        if participants.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        for &seat in &participants {
            self.seats.get_mut(&seat).expect("participant exists").reset_for_new_hand();
        }

        self.deck.reset();
        for _ in 0..2 {
            for &seat in &participants {
                let card = self.deck.deal_one()?;
                self.seats.get_mut(&seat).expect("participant exists").deal_hole_card(card);
            }
        }

        let (sb_seat, bb_seat) = if participants.len() == 2 {
            (dealer, Self::next_in_cycle(&participants, dealer))
        } else {
            let sb = Self::next_in_cycle(&participants, dealer);
            let bb = Self::next_in_cycle(&participants, sb);
            (sb, bb)
        };
        self.seats.get_mut(&sb_seat).expect("sb seat exists").commit(self.config.small_blind);
        self.seats.get_mut(&bb_seat).expect("bb seat exists").commit(self.config.big_blind);

        let first_actor = Self::next_in_cycle(&participants, bb_seat);

        let mut hand = HandState {
            street: Street::Preflop,
            community_cards: Vec::new(),
            current_bet: self.config.big_blind,
            min_raise: self.config.big_blind,
            dealer_seat: dealer,
            actor_seat: None,
            participants,
            acted_set: BTreeSet::new(),
            turn_deadline_unix_ms: 0,
            reopened: true,
        };
        self.set_actor(&mut hand, Some(first_actor), now_unix_ms);
        self.hand = Some(hand);
        Ok(())
    }

    fn set_actor(&self, hand: &mut HandState, seat: Option<Seat>, now_unix_ms: u64) {
        hand.actor_seat = seat;
        hand.turn_deadline_unix_ms = now_unix_ms + self.config.turn_timeout_seconds * 1000;
    }

    fn next_actable_seat(&self, hand: &HandState, after: Seat) -> Option<Seat> {
        let n = hand.participants.len();
        let start = hand.participants.iter().position(|&s| s == after)?;
        for i in 1..=n {
            let seat = hand.participants[(start + i) % n];
            if self.seats[&seat].can_act() {
                return Some(seat);
            }
        }
        None
    }

    pub fn valid_actions(&self, seat: Seat) -> Vec<LegalAction> {
        let Some(hand) = self.hand.as_ref() else {
            return Vec::new();
        };
        if hand.actor_seat != Some(seat) {
            return Vec::new();
        }
        let player = &self.seats[&seat];
        let stack = player.stack();
        let to_call = hand.current_bet.checked_sub(player.current_bet()).unwrap_or(Chips::ZERO);
        let mut actions = vec![LegalAction::Fold];

        if to_call.is_zero() {
            actions.push(LegalAction::Check);
            if !stack.is_zero() {
                actions.push(LegalAction::Bet {
                    min: self.config.big_blind.min(stack),
                    max: stack,
                });
            }
        } else {
            actions.push(LegalAction::Call {
                amount: to_call.min(stack),
            });
            let all_in_total = player.current_bet() + stack;
            // A short all-in below min_raise closes raising only for seats
            // that already acted with no intervening full raise; a seat
            // that hasn't acted yet in this round still gets to raise.
            if (hand.reopened || !hand.acted_set.contains(&seat)) && stack > to_call {
                let min_total = (hand.current_bet + hand.min_raise).min(all_in_total);
                actions.push(LegalAction::Raise {
                    min_total,
                    max_total: all_in_total,
                });
            }
        }
        if !stack.is_zero() {
            actions.push(LegalAction::AllIn {
                amount: player.current_bet() + stack,
            });
        }
        actions
    }

    /// Applies a FOLD on behalf of the current actor once its deadline has
    /// passed. A no-op (returns `Continues`) if no hand is in progress.
    pub fn on_timeout(&mut self, now_unix_ms: u64) -> Result<HandOutcome, GameError> {
        let Some(actor) = self.hand.as_ref().and_then(|h| h.actor_seat) else {
            return Ok(HandOutcome::Continues);
        };
        self.submit(PlayerAction::new(actor, ActionKind::Fold, None), now_unix_ms)
    }

    pub fn submit(&mut self, action: PlayerAction, now_unix_ms: u64) -> Result<HandOutcome, GameError> {
        let expected = self
            .hand
            .as_ref()
            .ok_or(GameError::NoHandInProgress)?
            .actor_seat
            .ok_or(GameError::NoHandInProgress)?;
        if action.seat != expected {
            return Err(GameError::NotYourTurn {
                expected,
                actual: action.seat,
            });
        }

        self.apply_action(action)?;

        let hand = self.hand.as_mut().expect("hand present, checked above");
        hand.acted_set.insert(action.seat);

        if self.is_round_over() {
            self.end_betting_round(now_unix_ms)
        } else {
            let actor = self
                .hand
                .as_ref()
                .expect("hand present")
                .actor_seat
                .expect("actor present");
            let next = self.next_actable_seat(self.hand.as_ref().expect("hand present"), actor);
            let turn_timeout_seconds = self.config.turn_timeout_seconds;
            let hand = self.hand.as_mut().expect("hand present");
            hand.actor_seat = next;
            hand.turn_deadline_unix_ms = now_unix_ms + turn_timeout_seconds * 1000;
            Ok(HandOutcome::Continues)
        }
    }

    fn apply_action(&mut self, action: PlayerAction) -> Result<(), GameError> {
        let hand_current_bet = self.hand.as_ref().unwrap().current_bet;
        let hand_min_raise = self.hand.as_ref().unwrap().min_raise;
        let seat = action.seat;
        let player = self
            .seats
            .get_mut(&seat)
            .ok_or(GameError::SeatUnknown(seat))?;

        match action.kind {
            ActionKind::Fold => {
                player.fold();
                return Ok(());
            }
            ActionKind::Check => {
                if player.current_bet() != hand_current_bet {
                    return Err(GameError::illegal("check", "a bet is outstanding"));
                }
                return Ok(());
            }
            ActionKind::Call => {
                let owed = hand_current_bet
                    .checked_sub(player.current_bet())
                    .unwrap_or(Chips::ZERO);
                player.commit(owed);
                return Ok(());
            }
            ActionKind::Bet => {
                if !hand_current_bet.is_zero() {
                    return Err(GameError::illegal("bet", "a bet is already outstanding, use raise"));
                }
                let amount = action
                    .amount
                    .ok_or_else(|| GameError::illegal("bet", "amount required"))?;
                let stack = player.stack();
                let is_shove = amount >= stack;
                if !is_shove && amount < self.config.big_blind {
                    return Err(GameError::AmountOutOfBounds {
                        amount,
                        min: self.config.big_blind,
                        max: stack,
                    });
                }
                let actual = player.commit(amount.min(stack));
                let hand = self.hand.as_mut().unwrap();
                hand.current_bet = actual;
                if actual >= self.config.big_blind {
                    hand.min_raise = actual;
                    hand.acted_set.clear();
                    hand.reopened = true;
                } else {
                    hand.reopened = false;
                }
                return Ok(());
            }
            ActionKind::Raise | ActionKind::AllIn => {
                let stack = player.stack();
                let all_in_total = player.current_bet() + stack;
                let target = match action.kind {
                    ActionKind::Raise => action
                        .amount
                        .ok_or_else(|| GameError::illegal("raise", "amount required"))?,
                    _ => all_in_total,
                };

                if target <= hand_current_bet {
                    // ALL_IN that does not exceed the current bet is just a call-for-rest.
                    let owed = hand_current_bet
                        .checked_sub(player.current_bet())
                        .unwrap_or(Chips::ZERO)
                        .min(stack);
                    player.commit(owed);
                    return Ok(());
                }

                let full_raise_required = hand_current_bet + hand_min_raise;
                let is_all_in_raise = target >= all_in_total;
                if target < full_raise_required && !is_all_in_raise {
                    return Err(GameError::AmountOutOfBounds {
                        amount: target,
                        min: full_raise_required,
                        max: all_in_total,
                    });
                }

                let delta = target.checked_sub(player.current_bet()).unwrap_or(Chips::ZERO);
                let actual_total = player.current_bet() + player.commit(delta);
                let hand = self.hand.as_mut().unwrap();
                let raise_increment = actual_total.checked_sub(hand.current_bet).unwrap_or(Chips::ZERO);
                hand.current_bet = actual_total;
                if raise_increment >= hand.min_raise {
                    hand.min_raise = raise_increment;
                    hand.acted_set.clear();
                    hand.reopened = true;
                } else {
                    hand.reopened = false;
                }
                return Ok(());
            }
        }
    }

    fn is_round_over(&self) -> bool {
        let hand = self.hand.as_ref().expect("hand present");
        let active: Vec<Seat> = hand
            .participants
            .iter()
            .copied()
            .filter(|s| self.seats[s].is_active())
            .collect();
        if active.len() <= 1 {
            return true;
        }
        active
            .iter()
            .all(|s| hand.acted_set.contains(s) && self.seats[s].current_bet() == hand.current_bet)
    }

    fn end_betting_round(&mut self, now_unix_ms: u64) -> Result<HandOutcome, GameError> {
        let participants = self.hand.as_ref().expect("hand present").participants.clone();

        for &seat in &participants {
            let bet = self.seats[&seat].current_bet();
            self.pot_manager.add_bet(seat, bet);
            self.seats
                .get_mut(&seat)
                .expect("participant exists")
                .reset_for_new_round();
        }
        let not_folded: Vec<Seat> = participants
            .iter()
            .copied()
            .filter(|s| self.seats[s].status() != PlayerStatus::Folded)
            .collect();
        self.pot_manager.collect_bets(&not_folded);

        let big_blind = self.config.big_blind;
        let hand = self.hand.as_mut().expect("hand present");
        hand.current_bet = Chips::ZERO;
        hand.min_raise = big_blind;
        hand.reopened = true;

        if not_folded.len() <= 1 {
            return Ok(HandOutcome::HandEnded(self.settle_uncontested(not_folded[0])));
        }

        let active_count = participants
            .iter()
            .filter(|s| self.seats[s].is_active())
            .count();

        if active_count <= 1 {
            self.deal_remaining_streets()?;
            return Ok(HandOutcome::HandEnded(self.settle_showdown()));
        }

        self.advance_street(now_unix_ms)?;
        Ok(HandOutcome::Continues)
    }

    fn advance_street(&mut self, now_unix_ms: u64) -> Result<(), GameError> {
        let current_street = self.hand.as_ref().expect("hand present").street;
        let deal_count = match current_street {
            Street::Preflop => 3,
            Street::Flop | Street::Turn => 1,
            Street::River | Street::Showdown => {
                return Ok(());
            }
        };
        self.deck.burn()?;
        let dealt = self.deck.deal(deal_count)?;
        let hand = self.hand.as_mut().expect("hand present");
        hand.community_cards.extend(dealt);
        hand.street = match current_street {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            other => other,
        };
        hand.acted_set.clear();
        let dealer = hand.dealer_seat;

        let first_actor = self.next_actable_seat(self.hand.as_ref().unwrap(), dealer);
        let turn_timeout_seconds = self.config.turn_timeout_seconds;
        let hand = self.hand.as_mut().expect("hand present");
        hand.actor_seat = first_actor;
        hand.turn_deadline_unix_ms = now_unix_ms + turn_timeout_seconds * 1000;
        Ok(())
    }

    fn deal_remaining_streets(&mut self) -> Result<(), GameError> {
        loop {
            let street = self.hand.as_ref().expect("hand present").street;
            if self.hand.as_ref().unwrap().community_cards.len() >= 5 {
                break;
            }
            let deal_count = match street {
                Street::Preflop => 3,
                Street::Flop | Street::Turn => 1,
                Street::River | Street::Showdown => break,
            };
            self.deck.burn()?;
            let dealt = self.deck.deal(deal_count)?;
            let hand = self.hand.as_mut().expect("hand present");
            hand.community_cards.extend(dealt);
            hand.street = match street {
                Street::Preflop => Street::Flop,
                Street::Flop => Street::Turn,
                Street::Turn => Street::River,
                other => other,
            };
        }
        Ok(())
    }

    /// Seats eligible for a pot, ordered starting just after the dealer, so
    /// odd chips from an integer split land on the seat closest clockwise
    /// from the dealer among the tied winners.
    fn clockwise_from_dealer(&self, dealer: Seat, participants: &[Seat], seats: &[Seat]) -> Vec<Seat> {
        let n = participants.len();
        let dealer_pos = participants.iter().position(|&s| s == dealer).unwrap_or(0);
        let mut ordered = Vec::with_capacity(seats.len());
        for i in 1..=n {
            let candidate = participants[(dealer_pos + i) % n];
            if seats.contains(&candidate) {
                ordered.push(candidate);
            }
        }
        ordered
    }

    fn settle_showdown(&mut self) -> SettlementRecord {
        let hand = self.hand.take().expect("hand present");
        let pots = self.pot_manager.take_pots();
        let community = hand.community_cards.clone();

        let mut aggregated: BTreeMap<Seat, Chips> = BTreeMap::new();
        let mut total_rake = Chips::ZERO;
        let mut pot_summaries = Vec::with_capacity(pots.len());

        for pot in &pots {
            pot_summaries.push(PotSummary::from(pot));

            let eligible: Vec<Seat> = pot
                .eligible_seats
                .iter()
                .copied()
                .filter(|s| self.seats[s].status() != PlayerStatus::Folded)
                .collect();

            let mut strengths: BTreeMap<Seat, crate::hand::HandStrength> = BTreeMap::new();
            for &seat in &eligible {
                let mut seven: Vec<Card> = self.seats[&seat].hole_cards().to_vec();
                seven.extend(community.iter().copied());
                strengths.insert(seat, evaluate(&seven));
            }
            let best_strength = strengths.values().max().cloned();
            let winners: Vec<Seat> = strengths
                .iter()
                .filter(|(_, s)| Some((*s).clone()) == best_strength)
                .map(|(&s, _)| s)
                .collect();

            let rake = pot.amount.percent_floor(self.config.rake_percent);
            let remainder_pool = pot.amount - rake;
            total_rake += rake;

            let ordered_winners = self.clockwise_from_dealer(hand.dealer_seat, &hand.participants, &winners);
            let share = remainder_pool.div_floor(ordered_winners.len() as i64);
            let remainder = remainder_pool.rem_floor(ordered_winners.len() as i64);
            for (i, &seat) in ordered_winners.iter().enumerate() {
                let mut amount = share;
                if (i as i64) < remainder {
                    amount += Chips::from_minor(1);
                }
                *aggregated.entry(seat).or_insert(Chips::ZERO) += amount;
            }
        }

        for (&seat, &amount) in &aggregated {
            self.seats.get_mut(&seat).expect("winner exists").credit(amount);
        }

        let winners = aggregated
            .into_iter()
            .map(|(seat, amount)| WinnerShare {
                seat,
                amount,
                rank: strengths_rank_for(self, seat, &community),
                hole_cards: self.seats[&seat].hole_cards().to_vec(),
            })
            .collect();

        self.apply_pending_detaches();

        SettlementRecord {
            winners,
            pots: pot_summaries,
            rake: total_rake,
            community_cards: community,
            aborted: false,
        }
    }

    fn settle_uncontested(&mut self, winner_seat: Seat) -> SettlementRecord {
        let hand = self.hand.take().expect("hand present");
        let pots = self.pot_manager.take_pots();
        let mut total_amount = Chips::ZERO;
        let mut total_rake = Chips::ZERO;
        let mut pot_summaries = Vec::with_capacity(pots.len());

        for pot in &pots {
            pot_summaries.push(PotSummary::from(pot));
            let rake = pot.amount.percent_floor(self.config.rake_percent);
            total_rake += rake;
            total_amount += pot.amount - rake;
        }

        self.seats
            .get_mut(&winner_seat)
            .expect("winner exists")
            .credit(total_amount);

        self.apply_pending_detaches();

        SettlementRecord {
            winners: vec![WinnerShare {
                seat: winner_seat,
                amount: total_amount,
                rank: None,
                hole_cards: Vec::new(),
            }],
            pots: pot_summaries,
            rake: total_rake,
            community_cards: hand.community_cards,
            aborted: false,
        }
    }

    /// Aborts the hand in progress after an internal invariant violation.
    /// Refunds every participant its `total_bet_this_hand`, drops the pot
    /// entirely (no rake, no winners), and leaves the engine ready to start
    /// the next hand. Returns `None` if no hand was in progress.
    pub fn abort_settlement(&mut self) -> Option<SettlementRecord> {
        let hand = self.hand.take()?;
        for &seat in &hand.participants {
            if let Some(player) = self.seats.get_mut(&seat) {
                let refund = player.total_bet_this_hand();
                player.credit(refund);
            }
        }
        self.pot_manager.reset();
        self.apply_pending_detaches();
        Some(SettlementRecord {
            winners: Vec::new(),
            pots: Vec::new(),
            rake: Chips::ZERO,
            community_cards: hand.community_cards,
            aborted: true,
        })
    }

    pub fn snapshot(&self, viewer_seat: Option<Seat>) -> StateView {
        let players = self
            .seats
            .values()
            .map(|p| {
                let reveal = self.hand.is_none() || viewer_seat == Some(p.seat());
                SeatView {
                    seat: p.seat(),
                    stack: p.stack(),
                    status: p.status(),
                    current_bet: p.current_bet(),
                    cards: if reveal { p.hole_cards().to_vec() } else { Vec::new() },
                }
            })
            .collect();

        match self.hand.as_ref() {
            Some(hand) => StateView {
                table_id: self.table_id.clone(),
                street: Some(hand.street),
                community_cards: hand.community_cards.clone(),
                pot: self.pot_manager.total(),
                pots: self.pot_manager.pots().iter().map(PotSummary::from).collect(),
                current_bet: hand.current_bet,
                min_raise: hand.min_raise,
                actor_seat: hand.actor_seat,
                turn_deadline_unix_ms: Some(hand.turn_deadline_unix_ms),
                players,
                hand_in_progress: true,
            },
            None => StateView {
                table_id: self.table_id.clone(),
                street: None,
                community_cards: Vec::new(),
                pot: Chips::ZERO,
                pots: Vec::new(),
                current_bet: Chips::ZERO,
                min_raise: Chips::ZERO,
                actor_seat: None,
                turn_deadline_unix_ms: None,
                players,
                hand_in_progress: false,
            },
        }
    }
}

/// Recomputes a seat's hand rank at showdown for the settlement record.
/// Looked up once per winner rather than threaded through the pot loop,
/// since a seat's best hand is the same across every pot it wins.
fn strengths_rank_for(engine: &HandEngine, seat: Seat, community: &[Card]) -> Option<HandRank> {
    let player = engine.seats.get(&seat)?;
    if player.hole_cards().len() + community.len() < 5 {
        return None;
    }
    let mut seven = player.hole_cards().to_vec();
    seven.extend(community.iter().copied());
    Some(evaluate(&seven).rank)
}
