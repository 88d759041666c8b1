//! Bench command handler for hand evaluation performance benchmarking.
//!
//! This module provides the `bench` command which performs a quick benchmark
//! of the hand evaluation system by evaluating 7-card hands drawn from a
//! shuffled deck and reporting the execution time.

use crate::error::CliError;
use axiomind_engine::deck::Deck;
use std::io::Write;

const ITERATIONS: u64 = 200;

/// Handle the bench command.
///
/// Performs a quick benchmark by evaluating `ITERATIONS` 7-card hands from
/// a shuffled deck using deterministic seed 1 for reproducibility. Reports
/// the number of iterations and total execution time.
///
/// # Returns
///
/// Returns `Ok(())` on success, or `CliError` on I/O errors.
pub fn handle_bench_command(out: &mut dyn Write) -> Result<(), CliError> {
    let start = std::time::Instant::now();
    let mut cnt = 0u64;
    let mut deck = Deck::with_seed(1);
    deck.reset();
    for _ in 0..ITERATIONS {
        if deck.remaining() < 7 {
            deck.reset();
        }
        let hand = deck.deal(7)?;
        let _ = axiomind_engine::hand::evaluate(&hand);
        cnt += 1;
    }
    let dur = start.elapsed();
    writeln!(out, "Benchmark: {} iters in {:?}", cnt, dur)?;
    Ok(())
}
