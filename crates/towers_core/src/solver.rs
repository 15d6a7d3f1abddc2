//! Recursive Hanoi solver and the FIFO move queue it fills.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info, instrument};

use super::action::SolveError;
use super::types::{Move, PegId};

/// Ordered moves waiting to be animated, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveQueue {
    moves: VecDeque<Move>,
}

impl MoveQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Next move, without removing it.
    pub fn peek(&self) -> Option<&Move> {
        self.moves.front()
    }

    /// Removes and returns the next move.
    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop_front()
    }

    /// Drops every queued move.
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Replaces the queue contents with `moves`.
    pub fn replace(&mut self, moves: impl IntoIterator<Item = Move>) {
        self.moves.clear();
        self.moves.extend(moves);
    }

    /// Queued moves, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }
}

/// Largest stack [`solve`] accepts; its solution is about 16.7 million moves.
pub const MAX_SOLVE_DISCS: usize = 24;

/// Number of moves the optimal solution of `n` discs takes: `2^n - 1`.
///
/// Returns `None` when the count does not fit in a `u64`.
pub fn move_count(n: u32) -> Option<u64> {
    match n {
        0..=63 => Some((1u64 << n) - 1),
        64 => Some(u64::MAX),
        _ => None,
    }
}

/// Solves the puzzle for a stack of `n` discs on `from`, moving it to `to`.
///
/// Pure: only the move descriptions are produced; no board is touched.
/// Stacks taller than [`MAX_SOLVE_DISCS`] are refused.
#[instrument]
pub fn solve(n: usize, from: PegId, to: PegId) -> Result<Vec<Move>, SolveError> {
    if n == 0 {
        return Err(SolveError::NoDiscs);
    }
    if n > MAX_SOLVE_DISCS {
        return Err(SolveError::TooManyDiscs {
            discs: n,
            max: MAX_SOLVE_DISCS,
        });
    }
    let via = PegId::spare(from, to).ok_or(SolveError::SamePeg(from))?;

    let mut moves = Vec::with_capacity((1usize << n) - 1);
    move_stack(n, from, to, via, &mut moves);
    debug!(n, count = moves.len(), "Solution computed");
    Ok(moves)
}

/// Solves and replaces the contents of `queue` with the solution.
#[instrument(skip(queue), fields(previous = queue.len()))]
pub fn solve_into(
    queue: &mut MoveQueue,
    n: usize,
    from: PegId,
    to: PegId,
) -> Result<usize, SolveError> {
    let moves = solve(n, from, to)?;
    let count = moves.len();
    queue.replace(moves);
    info!(n, count, "Solution queued");
    Ok(count)
}

fn move_stack(n: usize, from: PegId, to: PegId, via: PegId, out: &mut Vec<Move>) {
    if n == 1 {
        out.push(Move::new(from, to));
        return;
    }
    move_stack(n - 1, from, via, to, out);
    move_stack(1, from, to, via, out);
    move_stack(n - 1, via, to, from, out);
}
