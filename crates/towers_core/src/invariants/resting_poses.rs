//! Resting poses invariant: discs not in flight sit flat in their slots.

use super::super::session::PuzzleSession;
use super::Invariant;
use crate::geometry::Point3;

/// Invariant: every disc other than the one being animated is positioned
/// exactly at the slot the board records for it, lying flat.
pub struct RestingPosesInvariant;

impl Invariant<PuzzleSession> for RestingPosesInvariant {
    fn holds(session: &PuzzleSession) -> bool {
        let board = session.board();
        let flying = session.motion().disc();
        board.pegs().iter().all(|peg| {
            peg.occupancy().iter().enumerate().all(|(height, cell)| match cell {
                None => true,
                Some(disc) if Some(*disc) == flying => true,
                Some(disc) => {
                    let pose = session.discs().pose(*disc);
                    pose.is_some_and(|pose| {
                        Some(pose.position) == peg.slot_position(height)
                            && pose.normal == Point3::UP
                    })
                }
            })
        })
    }

    fn description() -> &'static str {
        "Discs at rest sit flat on their recorded slot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PegId;

    #[test]
    fn test_new_session_holds() {
        let session = PuzzleSession::with_discs(4).unwrap();
        assert!(RestingPosesInvariant::holds(&session));
    }

    #[test]
    fn test_holds_while_a_disc_flies() {
        let mut session = PuzzleSession::with_discs(3).unwrap();
        session.request_move(0, 1).unwrap();
        for _ in 0..10 {
            session.tick();
        }
        assert!(session.motion().is_in_motion());
        assert!(RestingPosesInvariant::holds(&session));
    }

    #[test]
    fn test_holds_after_landing() {
        let mut session = PuzzleSession::with_discs(3).unwrap();
        session.request_move(0, 2).unwrap();
        while session.motion().is_in_motion() {
            session.tick();
        }
        assert_eq!(session.board().peg(PegId::Right).discs().count(), 1);
        assert!(RestingPosesInvariant::holds(&session));
    }
}
