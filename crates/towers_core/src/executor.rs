//! Move executor: validates a raw move request, commits it to the board and
//! arms the interpolator.

use tracing::{debug, instrument, warn};

use super::action::MoveError;
use super::board::Board;
use super::contracts::{LegalMove, PegsInRange};
use super::discs::{DiscPose, DiscRegistry};
use super::motion::ActiveMove;
use super::types::DiscId;

/// Moves the top disc of peg `from` to the lowest free slot of peg `to` and
/// starts its flight.
///
/// The board changes immediately; only the visual trails behind. If a disc
/// is still in the air it is set down on its destination slot once the new
/// move has been committed.
///
/// Rejected requests leave the board, every pose and the active move exactly
/// as they were.
#[instrument(skip(board, discs, motion))]
pub fn request_move(
    board: &mut Board,
    discs: &mut DiscRegistry,
    motion: &mut ActiveMove,
    from: usize,
    to: usize,
) -> Result<DiscId, MoveError> {
    let mv = PegsInRange::check(from, to)
        .and_then(|mv| LegalMove::check(&mv, board).map(|()| mv))
        .inspect_err(|e| warn!(error = %e, "Move request rejected"))?;

    let transfer = board.commit_move(mv)?;

    if let Some(settled) = motion.settle(discs) {
        debug!(%settled, "Interrupted flight settled");
    }
    *discs.pose_mut(transfer.disc) = DiscPose::resting(transfer.start);
    motion.arm(&transfer);
    Ok(transfer.disc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoardGeometry, PuzzleConfig};
    use crate::motion::{MotionPhase, MotionSettings};
    use crate::types::{PegId, RollDirection};

    struct Parts {
        board: Board,
        discs: DiscRegistry,
        motion: ActiveMove,
    }

    fn parts(n: usize) -> Parts {
        let board = Board::new(n, &BoardGeometry::default());
        let discs = DiscRegistry::from_board(&board);
        let motion = ActiveMove::new(MotionSettings::from_config(&PuzzleConfig::default()));
        Parts {
            board,
            discs,
            motion,
        }
    }

    fn request(p: &mut Parts, from: usize, to: usize) -> Result<DiscId, MoveError> {
        request_move(&mut p.board, &mut p.discs, &mut p.motion, from, to)
    }

    #[test]
    fn test_request_commits_and_arms() {
        let mut p = parts(3);
        assert_eq!(request(&mut p, 0, 2), Ok(DiscId(0)));
        assert_eq!(p.board.peg(PegId::Right).top_disc(), Some(DiscId(0)));
        assert_eq!(p.motion.disc(), Some(DiscId(0)));
        assert_eq!(p.motion.phase(), Some(MotionPhase::Lift));
        assert_eq!(p.motion.direction(), RollDirection::Forward);
        // pose still at the vacated slot
        let start = p.board.peg(PegId::Left).slot_position(2).unwrap();
        assert_eq!(p.discs.pose(DiscId(0)).unwrap().position, start);
    }

    #[test]
    fn test_backward_direction() {
        let mut p = parts(2);
        request(&mut p, 0, 2).unwrap();
        request(&mut p, 2, 1).unwrap();
        assert_eq!(p.motion.direction(), RollDirection::Backward);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut p = parts(3);
        request(&mut p, 0, 1).unwrap();
        for _ in 0..10 {
            p.motion.tick(&mut p.discs);
        }
        let board = p.board.clone();
        let discs = p.discs.clone();
        let motion = p.motion.clone();

        assert_eq!(request(&mut p, 2, 0), Err(MoveError::EmptyPeg(PegId::Right)));
        assert_eq!(request(&mut p, 1, 1), Err(MoveError::SamePeg(PegId::Center)));
        assert_eq!(request(&mut p, 0, 3), Err(MoveError::PegOutOfRange(3)));
        assert_eq!(request(&mut p, 7, 0), Err(MoveError::PegOutOfRange(7)));

        assert_eq!(p.board, board);
        assert_eq!(p.discs, discs);
        assert_eq!(p.motion, motion);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_failed_commit_keeps_flight_in_the_air() {
        let mut p = parts(3);
        request(&mut p, 0, 1).unwrap();
        for _ in 0..10 {
            p.motion.tick(&mut p.discs);
        }
        // disc 1 duplicated onto peg 2, so the next commit breaks uniqueness
        p.board.peg_mut(PegId::Right).set(0, Some(DiscId(1)));
        let board = p.board.clone();
        let discs = p.discs.clone();
        let motion = p.motion.clone();

        let err = request(&mut p, 0, 1).unwrap_err();
        assert!(matches!(err, MoveError::InvariantViolation(_)));
        assert_eq!(p.board, board);
        assert_eq!(p.discs, discs);
        assert_eq!(p.motion, motion);
        assert_eq!(p.motion.disc(), Some(DiscId(0)));
    }

    #[test]
    fn test_interrupting_settles_previous_disc() {
        let mut p = parts(3);
        request(&mut p, 0, 1).unwrap();
        p.motion.tick(&mut p.discs);
        request(&mut p, 0, 2).unwrap();

        let landed = p.board.peg(PegId::Center).slot_position(0).unwrap();
        let pose = p.discs.pose(DiscId(0)).unwrap();
        assert_eq!(pose.position, landed);
        assert_eq!(p.motion.disc(), Some(DiscId(1)));
    }

    #[test]
    fn test_larger_on_smaller_is_allowed() {
        let mut p = parts(2);
        request(&mut p, 0, 1).unwrap();
        assert_eq!(request(&mut p, 0, 1), Ok(DiscId(1)));
        assert_eq!(
            p.board.peg(PegId::Center).occupancy(),
            &[Some(DiscId(0)), Some(DiscId(1))]
        );
    }
}
