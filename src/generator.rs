//! Generate shuffled boards that are solvable by construction.

use log::{debug, trace};
use rand::{seq::SliceRandom, thread_rng, Rng};
use std::collections::HashSet;

use crate::error::Result;
use crate::puzzle::BoardState;

/// Shuffle the goal board of the given size with `moves` random slides.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidBoard`] when `size` is below 2.
pub fn generate(size: usize, moves: usize) -> Result<BoardState> {
    generate_with_rng(size, moves, &mut thread_rng())
}

/// Same as [`generate`], drawing randomness from `rng`.
///
/// Each step applies a random legal move that leads to a board not seen yet
/// during this call. When every neighbour has already been visited the step
/// leaves the board unchanged.
pub fn generate_with_rng<R: Rng + ?Sized>(
    size: usize,
    moves: usize,
    rng: &mut R,
) -> Result<BoardState> {
    let mut board = BoardState::goal(size)?;
    let mut visited: HashSet<BoardState> = HashSet::new();
    visited.insert(board.clone());

    let mut skipped = 0;
    for step in 0..moves {
        let mut choices = board.actions();
        choices.shuffle(rng);

        let mut next = None;
        for action in choices {
            let candidate = board.result(action)?;
            if !visited.contains(&candidate) {
                trace!("step {step}: sliding tile at {action}");
                next = Some(candidate);
                break;
            }
        }

        match next {
            Some(candidate) => {
                visited.insert(candidate.clone());
                board = candidate;
            }
            None => skipped += 1,
        }
    }

    debug!(
        "generated {size}x{size} board with {} moves ({skipped} skipped)",
        moves - skipped
    );
    Ok(board)
}
