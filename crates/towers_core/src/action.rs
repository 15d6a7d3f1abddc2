//! Errors raised when a move or solve request is refused.
//!
//! A refused request never changes puzzle state. Callers that only want the
//! "ignore illegal input" behavior can drop the error.

use super::types::PegId;

/// Reason a move request was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// A peg index outside `0..3`.
    #[display("Peg index {} is out of range", _0)]
    PegOutOfRange(#[error(not(source))] usize),

    /// Source and destination are the same peg.
    #[display("Cannot move peg {} onto itself", _0)]
    SamePeg(#[error(not(source))] PegId),

    /// The source peg holds no disc.
    #[display("Peg {} is empty", _0)]
    EmptyPeg(#[error(not(source))] PegId),

    /// The destination peg has no free slot.
    #[display("Peg {} is full", _0)]
    PegFull(#[error(not(source))] PegId),

    /// An occupancy invariant broke after a commit.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

/// Reason a solve request was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolveError {
    /// Discs are not all stacked on peg 0.
    #[display("Puzzle is not in its starting layout")]
    NotAtStart,

    /// Asked to solve a stack of zero discs.
    #[display("Nothing to solve: zero discs")]
    NoDiscs,

    /// Source and target peg are the same.
    #[display("Solve target equals source peg {}", _0)]
    SamePeg(#[error(not(source))] PegId),

    /// The solution would be too long to hold in memory.
    #[display("Cannot solve {} discs, at most {} are supported", discs, max)]
    TooManyDiscs {
        /// Requested stack height.
        discs: usize,
        /// Largest stack the solver accepts.
        max: usize,
    },
}
