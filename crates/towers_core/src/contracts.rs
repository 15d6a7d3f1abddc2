//! Move legality as preconditions and postconditions.
//!
//! A move is checked against the board before it is committed ({P}), and the
//! resulting board is checked against the one it came from ({Q}).

use super::action::MoveError;
use super::board::Board;
use super::invariants::{BoardInvariants, InvariantSet};
use super::types::{Move, PegId};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Pre- and postconditions for applying an action of type `A` to state `S`.
pub trait Contract<S, A> {
    /// Whether `action` may be applied to `state`.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Whether `after` is a valid successor of `before`.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: both raw peg indices name a real peg.
pub struct PegsInRange;

impl PegsInRange {
    /// Resolves raw indices into a typed move.
    #[instrument]
    pub fn check(from: usize, to: usize) -> Result<Move, MoveError> {
        let from_peg = PegId::from_index(from).ok_or(MoveError::PegOutOfRange(from))?;
        let to_peg = PegId::from_index(to).ok_or(MoveError::PegOutOfRange(to))?;
        Ok(Move::new(from_peg, to_peg))
    }
}

/// Precondition: source and destination differ.
pub struct DistinctPegs;

impl DistinctPegs {
    /// Rejects a move onto its own source peg.
    #[instrument]
    pub fn check(mv: &Move) -> Result<(), MoveError> {
        if mv.from == mv.to {
            Err(MoveError::SamePeg(mv.from))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the source peg holds a disc.
pub struct SourceNotEmpty;

impl SourceNotEmpty {
    /// Rejects a move from an empty peg.
    #[instrument(skip(board))]
    pub fn check(mv: &Move, board: &Board) -> Result<(), MoveError> {
        if board.is_legal_source(mv.from) {
            Ok(())
        } else {
            Err(MoveError::EmptyPeg(mv.from))
        }
    }
}

/// Precondition: the destination peg has a free slot.
pub struct DestinationHasRoom;

impl DestinationHasRoom {
    /// Rejects a move onto a full peg.
    #[instrument(skip(board))]
    pub fn check(mv: &Move, board: &Board) -> Result<(), MoveError> {
        if board.peg(mv.to).free_height().is_some() {
            Ok(())
        } else {
            Err(MoveError::PegFull(mv.to))
        }
    }
}

/// Composite precondition: a move is legal if the pegs differ, the source
/// has a disc, and the destination has room.
///
/// Disc size order is deliberately not part of legality; see
/// [`Board::can_stack`] for that rule.
pub struct LegalMove;

impl LegalMove {
    /// Runs every move precondition in order.
    #[instrument(skip(board))]
    pub fn check(mv: &Move, board: &Board) -> Result<(), MoveError> {
        DistinctPegs::check(mv)?;
        SourceNotEmpty::check(mv, board)?;
        DestinationHasRoom::check(mv, board)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract
// ─────────────────────────────────────────────────────────────

/// Contract for committing a move to the board.
///
/// Preconditions:
/// - Pegs differ
/// - Source is non-empty
/// - Destination has room
///
/// Postconditions:
/// - Stacks stay contiguous
/// - Every disc rests in exactly one slot
/// - Disc count is unchanged
pub struct CommitContract;

impl Contract<Board, Move> for CommitContract {
    fn pre(board: &Board, mv: &Move) -> Result<(), MoveError> {
        LegalMove::check(mv, board)
    }

    fn post(before: &Board, after: &Board) -> Result<(), MoveError> {
        if before.disc_count() != after.disc_count() {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: disc count changed".to_string(),
            ));
        }
        BoardInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Board postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Panics in debug builds when an occupancy invariant is broken.
#[instrument(skip(board))]
pub fn assert_invariants(board: &Board) {
    debug_assert!(
        BoardInvariants::check_all(board).is_ok(),
        "Board occupancy invariant violated"
    );
}
