//! # axiomind-engine: multi-seat Texas Hold'em cash-game engine
//!
//! A pure, synchronous hand engine for ring-game Texas Hold'em: 2-10 seats,
//! fixed-point chip accounting, side pots, and a turn timer driven entirely
//! by caller-supplied timestamps so the engine stays deterministic and
//! testable without touching the system clock.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - OS-entropy-seeded deck shuffling, with a deterministic
//!   seeded variant for tests and replay
//! - [`engine`] - The [`engine::HandEngine`]: table state, hand lifecycle,
//!   action legality, and settlement
//! - [`hand`] - Poker hand evaluation and strength comparison
//! - [`player`] - Seat state, submitted actions, and stack management
//! - [`pot`] - Side pot accounting
//! - [`money`] - Fixed-point chip amounts
//! - [`logger`] - Structured per-action and per-hand log records
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use axiomind_engine::cards::{Card, Rank, Suit};
//! use axiomind_engine::hand::evaluate;
//!
//! // Evaluate a 7-card poker hand
//! let cards = [
//!     Card { suit: Suit::Hearts, rank: Rank::Ace },
//!     Card { suit: Suit::Hearts, rank: Rank::King },
//!     Card { suit: Suit::Hearts, rank: Rank::Queen },
//!     Card { suit: Suit::Hearts, rank: Rank::Jack },
//!     Card { suit: Suit::Hearts, rank: Rank::Ten },
//!     Card { suit: Suit::Clubs, rank: Rank::Two },
//!     Card { suit: Suit::Diamonds, rank: Rank::Three },
//! ];
//!
//! let strength = evaluate(&cards);
//! println!("Hand strength: {:?}", strength.rank);
//! ```
//!
//! ## Deterministic replay
//!
//! The live engine always seeds its deck from OS entropy, but tests and the
//! CLI's `--seed` flags can ask for a fixed seed instead:
//!
//! ```rust
//! use axiomind_engine::deck::Deck;
//!
//! // Same seed produces the same shuffle.
//! let mut deck1 = Deck::with_seed(42);
//! let mut deck2 = Deck::with_seed(42);
//! deck1.reset();
//! deck2.reset();
//! assert_eq!(deck1.deal(5).unwrap(), deck2.deal(5).unwrap());
//! ```
//!
//! ## Driving a hand
//!
//! ```rust
//! use axiomind_engine::engine::{HandEngine, TableConfig};
//! use axiomind_engine::money::Chips;
//! use axiomind_engine::player::{ActionKind, PlayerAction};
//!
//! let config = TableConfig::new(
//!     Chips::from_major(1),
//!     Chips::from_major(2),
//!     0,
//!     30,
//!     6,
//! ).unwrap();
//! let mut engine = HandEngine::new("table-1", config);
//! engine.attach(1, Chips::from_major(200)).unwrap();
//! engine.attach(2, Chips::from_major(200)).unwrap();
//! engine.start_hand(0).unwrap();
//!
//! let actor = engine.snapshot(None).actor_seat.unwrap();
//! let _ = engine.submit(PlayerAction::new(actor, ActionKind::Call, None), 0);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod money;
pub mod player;
pub mod pot;
