//! Pure hand evaluation: a 5–7 card multiset maps to a comparable
//! [`HandStrength`]. No I/O, no mutable state.

use crate::cards::{Card, Rank};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The ten standard hand categories, ordered so that a higher ordinal always
/// beats a lower one regardless of tie-break vector.
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum HandRank {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

/// `(HandRank, tie-break vector)`, compared lexicographically. Category
/// dominates; within a category, higher vectors beat lower ones componentwise.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandStrength {
    pub rank: HandRank,
    pub kickers: Vec<u8>,
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.kickers.cmp(&other.kickers))
    }
}

/// Evaluates the best 5-card hand from 5..=7 cards. For more than 5 cards,
/// returns the maximum strength over all 5-card subsets.
pub fn evaluate(cards: &[Card]) -> HandStrength {
    assert!(
        (5..=7).contains(&cards.len()),
        "evaluate expects 5..=7 cards, got {}",
        cards.len()
    );

    if cards.len() == 5 {
        return evaluate_five(cards);
    }

    combinations_of_five(cards)
        .into_iter()
        .map(|five| evaluate_five(&five))
        .max()
        .expect("at least one 5-card combination exists")
}

fn combinations_of_five(cards: &[Card]) -> Vec<[Card; 5]> {
    let n = cards.len();
    let mut out = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        out.push([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
    out
}

fn evaluate_five(cards: &[Card]) -> HandStrength {
    assert_eq!(cards.len(), 5);

    let is_flush = cards.windows(2).all(|w| w[0].suit == w[1].suit);
    let straight_high = detect_straight_high(cards);

    if let Some(high) = straight_high {
        if is_flush {
            let rank = if high == 14 {
                HandRank::RoyalFlush
            } else {
                HandRank::StraightFlush
            };
            return HandStrength {
                rank,
                kickers: vec![high],
            };
        }
    }

    let mut groups: Vec<(u8, u8)> = rank_counts(cards); // (rank, count)
    groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    let shape: Vec<u8> = groups.iter().map(|(_, c)| *c).collect();

    if shape == [4, 1] {
        return HandStrength {
            rank: HandRank::FourOfAKind,
            kickers: groups.iter().map(|(r, _)| *r).collect(),
        };
    }
    if shape == [3, 2] {
        return HandStrength {
            rank: HandRank::FullHouse,
            kickers: groups.iter().map(|(r, _)| *r).collect(),
        };
    }
    if is_flush {
        let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        return HandStrength {
            rank: HandRank::Flush,
            kickers: ranks,
        };
    }
    if let Some(high) = straight_high {
        return HandStrength {
            rank: HandRank::Straight,
            kickers: vec![high],
        };
    }
    if shape == [3, 1, 1] {
        return HandStrength {
            rank: HandRank::ThreeOfAKind,
            kickers: groups.iter().map(|(r, _)| *r).collect(),
        };
    }
    if shape == [2, 2, 1] {
        return HandStrength {
            rank: HandRank::TwoPair,
            kickers: groups.iter().map(|(r, _)| *r).collect(),
        };
    }
    if shape == [2, 1, 1, 1] {
        return HandStrength {
            rank: HandRank::OnePair,
            kickers: groups.iter().map(|(r, _)| *r).collect(),
        };
    }

    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    HandStrength {
        rank: HandRank::HighCard,
        kickers: ranks,
    }
}

fn rank_counts(cards: &[Card]) -> Vec<(u8, u8)> {
    let mut counts: Vec<(u8, u8)> = Vec::new();
    for c in cards {
        let v = c.rank.value();
        if let Some(entry) = counts.iter_mut().find(|(r, _)| *r == v) {
            entry.1 += 1;
        } else {
            counts.push((v, 1));
        }
    }
    counts
}

/// Returns the straight's high card (Ace = 14, or 5 for the wheel) if the
/// five cards form a run of consecutive ranks, treating Ace as low (1) as
/// an additional candidate value.
fn detect_straight_high(cards: &[Card]) -> Option<u8> {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable();
    values.dedup();

    let mut candidates = values.clone();
    if values.contains(&Rank::Ace.value()) {
        candidates.insert(0, Rank::Ace.low_ace_value());
    }
    candidates.sort_unstable();
    candidates.dedup();

    if candidates.len() < 5 {
        return None;
    }

    let mut best: Option<u8> = None;
    for window in candidates.windows(5) {
        let consecutive = window.windows(2).all(|w| w[1] == w[0] + 1);
        if consecutive {
            best = Some(window[4]);
        }
    }
    best
}
