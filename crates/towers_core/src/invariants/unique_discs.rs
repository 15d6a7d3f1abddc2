//! Unique discs invariant: every disc rests in exactly one slot.

use super::super::board::Board;
use super::Invariant;

/// Invariant: each disc id in `0..disc_count` appears exactly once across
/// all pegs, and no other id appears.
///
/// Moves are committed before they are animated, so a disc in flight already
/// occupies its destination slot and is counted there.
pub struct UniqueDiscsInvariant;

impl Invariant<Board> for UniqueDiscsInvariant {
    fn holds(board: &Board) -> bool {
        let mut seen = vec![false; board.disc_count()];
        for disc in board.pegs().iter().flat_map(|peg| peg.discs()) {
            match seen.get_mut(disc.index()) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        seen.into_iter().all(|s| s)
    }

    fn description() -> &'static str {
        "Every disc rests in exactly one slot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardGeometry;
    use crate::types::{DiscId, PegId};

    #[test]
    fn test_new_board_holds() {
        let board = Board::new(6, &BoardGeometry::default());
        assert!(UniqueDiscsInvariant::holds(&board));
    }

    #[test]
    fn test_duplicate_violates() {
        let mut board = Board::new(3, &BoardGeometry::default());
        board.peg_mut(PegId::Center).set(0, Some(DiscId(1)));
        assert!(!UniqueDiscsInvariant::holds(&board));
    }

    #[test]
    fn test_missing_disc_violates() {
        let mut board = Board::new(3, &BoardGeometry::default());
        board.peg_mut(PegId::Left).set(2, None);
        assert!(!UniqueDiscsInvariant::holds(&board));
    }

    #[test]
    fn test_unknown_disc_violates() {
        let mut board = Board::new(2, &BoardGeometry::default());
        board.peg_mut(PegId::Right).set(0, Some(DiscId(7)));
        assert!(!UniqueDiscsInvariant::holds(&board));
    }
}
