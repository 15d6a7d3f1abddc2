//! Contiguous stacks invariant: discs never float above an empty slot.

use super::super::board::Board;
use super::Invariant;

/// Invariant: on every peg, occupied heights form a run starting at 0.
pub struct ContiguousStacksInvariant;

impl Invariant<Board> for ContiguousStacksInvariant {
    fn holds(board: &Board) -> bool {
        board.pegs().iter().all(|peg| {
            let filled = peg.occupancy().iter().take_while(|d| d.is_some()).count();
            peg.occupancy()[filled..].iter().all(Option::is_none)
        })
    }

    fn description() -> &'static str {
        "Occupied heights on each peg are contiguous from the bottom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardGeometry;
    use crate::types::{DiscId, Move, PegId};

    #[test]
    fn test_new_board_holds() {
        let board = Board::new(4, &BoardGeometry::default());
        assert!(ContiguousStacksInvariant::holds(&board));
    }

    #[test]
    fn test_commits_hold() {
        let mut board = Board::new(4, &BoardGeometry::default());
        board.commit_move(Move::new(PegId::Left, PegId::Center)).unwrap();
        board.commit_move(Move::new(PegId::Left, PegId::Center)).unwrap();
        board.commit_move(Move::new(PegId::Center, PegId::Right)).unwrap();
        assert!(ContiguousStacksInvariant::holds(&board));
    }

    #[test]
    fn test_gap_violates() {
        let mut board = Board::new(3, &BoardGeometry::default());
        // Knock out the middle disc of peg 0
        board.peg_mut(PegId::Left).set(1, None);
        assert!(!ContiguousStacksInvariant::holds(&board));

        board.peg_mut(PegId::Left).set(1, Some(DiscId(1)));
        assert!(ContiguousStacksInvariant::holds(&board));
    }
}
