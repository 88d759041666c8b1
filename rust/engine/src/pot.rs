//! Side-pot accounting.
//!
//! Bets are collected at the end of a betting round and partitioned into
//! pots by ascending bet level, the way a physical dealer builds side pots
//! when one or more players are all-in for less than the full bet.

use std::collections::BTreeMap;

use crate::money::Chips;
use crate::player::Seat;

/// One pot: an amount and the seats still eligible to win it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    pub eligible_seats: Vec<Seat>,
}

/// Accumulates per-seat contributions across a hand and partitions them
/// into main/side pots whenever a betting round closes.
#[derive(Debug, Clone, Default)]
pub struct PotManager {
    pots: Vec<Pot>,
    bets: BTreeMap<Seat, Chips>,
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a seat's total contribution for the round that just closed.
    /// Calling this twice for the same seat in the same round overwrites,
    /// not accumulates; callers pass the round's final `current_bet`.
    pub fn add_bet(&mut self, seat: Seat, amount: Chips) {
        *self.bets.entry(seat).or_insert(Chips::ZERO) += amount;
    }

    pub fn total(&self) -> Chips {
        self.pots.iter().map(|p| p.amount).sum()
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// Partitions all bets collected since the last call into pots, merging
    /// with any pots already carried over from earlier rounds in this hand.
    /// `live_seats` are the seats still eligible to contest a pot (folded
    /// seats still contribute their chips but cannot win them back).
    pub fn collect_bets(&mut self, live_seats: &[Seat]) {
        if self.bets.is_empty() {
            return;
        }

        let mut levels: Vec<Chips> = self.bets.values().copied().filter(|c| !c.is_zero()).collect();
        levels.sort();
        levels.dedup();

        let mut remaining: BTreeMap<Seat, Chips> = self.bets.clone();
        let mut prev_level = Chips::ZERO;

        for level in levels {
            let diff = level - prev_level;
            let mut pot_amount = Chips::ZERO;
            let mut eligible = Vec::new();

            for (&seat, orig_bet) in &self.bets {
                let owed = remaining.get(&seat).copied().unwrap_or(Chips::ZERO);
                let contribution = owed.min(diff);
                if !contribution.is_zero() {
                    pot_amount += contribution;
                    if let Some(r) = remaining.get_mut(&seat) {
                        *r -= contribution;
                    }
                }
                if *orig_bet >= level && live_seats.contains(&seat) {
                    eligible.push(seat);
                }
            }

            if !pot_amount.is_zero() {
                self.merge_pot(Pot {
                    amount: pot_amount,
                    eligible_seats: eligible,
                });
            }

            prev_level = level;
        }

        self.bets.clear();
    }

    fn merge_pot(&mut self, pot: Pot) {
        if let Some(last) = self.pots.last_mut() {
            if last.eligible_seats == pot.eligible_seats {
                last.amount += pot.amount;
                return;
            }
        }
        self.pots.push(pot);
    }

    /// Removes and returns the accumulated pots, leaving the manager empty.
    /// Called once at showdown / hand end, after the final round's bets have
    /// been collected.
    pub fn take_pots(&mut self) -> Vec<Pot> {
        std::mem::take(&mut self.pots)
    }

    pub fn reset(&mut self) {
        self.pots.clear();
        self.bets.clear();
    }
}
