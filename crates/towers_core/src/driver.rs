//! Animation driver: feeds queued solver moves to the executor one at a time.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::board::Board;
use super::discs::DiscRegistry;
use super::executor::request_move;
use super::motion::ActiveMove;
use super::solver::MoveQueue;
use super::types::{DiscId, Move};

/// Holds the pending solution and the "animation active" flag.
///
/// A new move starts only once the previous flight has landed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationDriver {
    queue: MoveQueue,
    active: bool,
}

/// Move started by a driver tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartedMove {
    /// Move taken from the queue.
    pub mv: Move,
    /// Disc it lifted.
    pub disc: DiscId,
}

impl AnimationDriver {
    /// Creates an idle driver with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending moves.
    pub fn queue(&self) -> &MoveQueue {
        &self.queue
    }

    /// Mutable access for refilling the queue.
    pub fn queue_mut(&mut self) -> &mut MoveQueue {
        &mut self.queue
    }

    /// Whether the driver is draining its queue.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts draining. Does nothing with an empty queue.
    pub fn start(&mut self) {
        self.active = !self.queue.is_empty();
    }

    /// Drops every pending move and goes idle.
    pub fn stop(&mut self) {
        self.queue.clear();
        self.active = false;
    }

    /// Pops and executes the next move when no disc is in flight.
    ///
    /// Goes idle as soon as the last queued move has been started; its
    /// flight finishes on its own.
    #[instrument(skip_all, fields(pending = self.queue.len()))]
    pub fn tick(
        &mut self,
        board: &mut Board,
        discs: &mut DiscRegistry,
        motion: &mut ActiveMove,
    ) -> Option<StartedMove> {
        if !self.active || motion.is_in_motion() {
            return None;
        }
        let mut started = None;
        while let Some(mv) = self.queue.pop() {
            let (from, to) = mv.indices();
            match request_move(board, discs, motion, from, to) {
                Ok(disc) => {
                    info!(%mv, %disc, "Move started");
                    started = Some(StartedMove { mv, disc });
                    break;
                }
                Err(e) => warn!(%mv, error = %e, "Queued move skipped"),
            }
        }
        if self.queue.is_empty() {
            self.active = false;
            info!("Move queue drained");
        }
        started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoardGeometry, PuzzleConfig};
    use crate::motion::{MotionSettings, MotionStep};
    use crate::solver::solve_into;
    use crate::types::PegId;

    #[test]
    fn test_inactive_driver_does_nothing() {
        let mut board = Board::new(2, &BoardGeometry::default());
        let mut discs = DiscRegistry::from_board(&board);
        let mut motion = ActiveMove::new(MotionSettings::from_config(&PuzzleConfig::default()));
        let mut driver = AnimationDriver::new();
        driver.start();
        assert!(!driver.is_active());
        assert_eq!(driver.tick(&mut board, &mut discs, &mut motion), None);
    }

    #[test]
    fn test_waits_for_landing_before_next_move() {
        let mut board = Board::new(2, &BoardGeometry::default());
        let mut discs = DiscRegistry::from_board(&board);
        let mut motion = ActiveMove::new(MotionSettings::from_config(&PuzzleConfig::default()));
        let mut driver = AnimationDriver::new();
        solve_into(driver.queue_mut(), 2, PegId::Left, PegId::Right).unwrap();
        driver.start();

        let first = driver.tick(&mut board, &mut discs, &mut motion).unwrap();
        assert_eq!(first.mv, Move::new(PegId::Left, PegId::Center));
        assert_eq!(driver.tick(&mut board, &mut discs, &mut motion), None);
        assert_eq!(driver.queue().len(), 2);

        while !matches!(motion.tick(&mut discs), MotionStep::Landed(_)) {}
        let second = driver.tick(&mut board, &mut discs, &mut motion).unwrap();
        assert_eq!(second.disc, DiscId(1));
    }

    #[test]
    fn test_goes_idle_when_last_move_starts() {
        let mut board = Board::new(1, &BoardGeometry::default());
        let mut discs = DiscRegistry::from_board(&board);
        let mut motion = ActiveMove::new(MotionSettings::from_config(&PuzzleConfig::default()));
        let mut driver = AnimationDriver::new();
        solve_into(driver.queue_mut(), 1, PegId::Left, PegId::Right).unwrap();
        driver.start();

        let only = driver.tick(&mut board, &mut discs, &mut motion).unwrap();
        assert_eq!(only.mv, Move::new(PegId::Left, PegId::Right));
        assert!(!driver.is_active());
        assert!(motion.is_in_motion());
    }

    #[test]
    fn test_stop_clears_queue() {
        let mut driver = AnimationDriver::new();
        solve_into(driver.queue_mut(), 3, PegId::Left, PegId::Right).unwrap();
        driver.start();
        assert!(driver.is_active());
        driver.stop();
        assert!(!driver.is_active());
        assert!(driver.queue().is_empty());
    }
}
