//! Deal command handler for single hand dealing and display.
//!
//! This module provides the `deal` command which deals a single poker hand
//! and displays the hole cards for both players and the complete board.
//! The command supports optional seeding for deterministic dealing.

use crate::error::CliError;
use crate::formatters::format_card;
use axiomind_engine::deck::Deck;
use std::io::Write;

/// Handle the deal command.
///
/// Deals a single heads-up hand (two hole cards per seat, five board cards)
/// and displays the result. Supports optional seeding for deterministic
/// dealing and reproducibility.
///
/// # Returns
///
/// Returns `Ok(())` on success, or `CliError` on I/O or dealing errors.
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::with_seed(base_seed);
    deck.reset();

    let hole_p1 = deck.deal(2)?;
    let hole_p2 = deck.deal(2)?;
    deck.burn()?;
    let flop = deck.deal(3)?;
    deck.burn()?;
    let turn = deck.deal_one()?;
    deck.burn()?;
    let river = deck.deal_one()?;

    writeln!(
        out,
        "Hole P1: {} {}",
        format_card(&hole_p1[0]),
        format_card(&hole_p1[1])
    )?;
    writeln!(
        out,
        "Hole P2: {} {}",
        format_card(&hole_p2[0]),
        format_card(&hole_p2[1])
    )?;
    writeln!(
        out,
        "Board: {} {} {} {} {}",
        format_card(&flop[0]),
        format_card(&flop[1]),
        format_card(&flop[2]),
        format_card(&turn),
        format_card(&river)
    )?;
    Ok(())
}
