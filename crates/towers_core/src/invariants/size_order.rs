//! Size order invariant: a larger disc never sits on a smaller one.

use super::super::board::Board;
use super::Invariant;

/// Invariant: reading each peg bottom to top, disc ids strictly decrease.
///
/// Holds for any board driven only by solver moves. Manual moves through the
/// executor are not required to respect it.
pub struct SizeOrderInvariant;

impl Invariant<Board> for SizeOrderInvariant {
    fn holds(board: &Board) -> bool {
        board.pegs().iter().all(|peg| {
            let discs: Vec<_> = peg.discs().collect();
            discs.windows(2).all(|pair| pair[0] > pair[1])
        })
    }

    fn description() -> &'static str {
        "No disc rests on a smaller disc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardGeometry;
    use crate::types::{Move, PegId};

    #[test]
    fn test_new_board_holds() {
        let board = Board::new(5, &BoardGeometry::default());
        assert!(SizeOrderInvariant::holds(&board));
    }

    #[test]
    fn test_larger_on_smaller_violates() {
        let mut board = Board::new(3, &BoardGeometry::default());
        board.commit_move(Move::new(PegId::Left, PegId::Right)).unwrap();
        board.commit_move(Move::new(PegId::Left, PegId::Right)).unwrap();
        assert!(!SizeOrderInvariant::holds(&board));
    }
}
