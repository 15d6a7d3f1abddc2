//! End-to-end tests for the puzzle session.

use std::io::Write;
use std::time::{Duration, Instant};

use proptest::prelude::*;
use towers_core::invariants::{Invariant, RestingPosesInvariant};
use towers_core::{
    DiscId, FrameClock, MotionPhase, MoveError, PegId, Point3, PuzzleConfig, PuzzleSession,
    SolveError,
};

fn run_until_idle(session: &mut PuzzleSession) -> usize {
    let mut ticks = 0;
    while session.is_busy() {
        session.tick();
        ticks += 1;
        assert!(ticks < 1_000_000, "session never went idle");
    }
    ticks
}

/// Ticks until the current flight lands; returns the tick count.
fn land(session: &mut PuzzleSession) -> usize {
    let mut ticks = 0;
    while session.motion().is_in_motion() {
        session.tick();
        ticks += 1;
    }
    ticks
}

#[test]
fn test_three_disc_solve_drains_to_peg_two() {
    let mut session = PuzzleSession::with_discs(3).unwrap();
    session.request_solve().unwrap();

    let queued: Vec<_> = session.queue().iter().map(|mv| mv.indices()).collect();
    assert_eq!(
        queued,
        vec![(0, 2), (0, 1), (2, 1), (0, 2), (1, 0), (1, 2), (0, 2)]
    );

    let mut started = Vec::new();
    let mut landed = Vec::new();
    while session.is_busy() {
        let report = session.tick();
        started.extend(report.started.map(|s| s.mv.indices()));
        landed.extend(report.landed);
    }

    assert_eq!(started, queued);
    assert_eq!(landed.len(), 7);
    assert_eq!(
        session.board().peg(PegId::Right).occupancy(),
        &[Some(DiscId(2)), Some(DiscId(1)), Some(DiscId(0))]
    );
    assert!(session.board().peg(PegId::Left).is_empty());
    assert!(session.board().peg(PegId::Center).is_empty());
    assert!(RestingPosesInvariant::holds(&session));
}

#[test]
fn test_solve_twice_is_refused() {
    let mut session = PuzzleSession::with_discs(2).unwrap();
    session.request_solve().unwrap();
    run_until_idle(&mut session);
    assert_eq!(session.request_solve(), Err(SolveError::NotAtStart));
    session.reset();
    assert_eq!(session.request_solve(), Ok(3));
}

#[test]
fn test_illegal_requests_change_nothing() {
    let mut session = PuzzleSession::with_discs(3).unwrap();
    session.request_move(0, 2).unwrap();
    for _ in 0..30 {
        session.tick();
    }
    let snapshot = session.clone();

    assert_eq!(
        session.request_move(1, 2),
        Err(MoveError::EmptyPeg(PegId::Center))
    );
    assert_eq!(session.request_move(0, 0), Err(MoveError::SamePeg(PegId::Left)));
    assert_eq!(session.request_move(3, 1), Err(MoveError::PegOutOfRange(3)));

    assert_eq!(session, snapshot);
}

#[test]
fn test_move_from_empty_center_peg_is_ignored() {
    let mut session = PuzzleSession::with_discs(4).unwrap();
    let before = session.clone();
    assert!(session.request_move(1, 0).is_err());
    assert_eq!(session, before);
    assert!(!session.motion().is_in_motion());
}

#[test]
fn test_landing_is_exact_and_flat() {
    let mut session = PuzzleSession::with_discs(5).unwrap();
    let disc = session.request_move(0, 1).unwrap();
    let dest = session.motion().flight().unwrap().dest;
    land(&mut session);

    let pose = session.discs().pose(disc).unwrap();
    assert_eq!(pose.position, dest);
    assert_eq!(pose.normal, Point3::UP);
}

#[test]
fn test_pause_preserves_phase() {
    let mut session = PuzzleSession::with_discs(3).unwrap();
    let mut clock = FrameClock::new();
    let t0 = Instant::now();

    session.request_move(0, 2).unwrap();
    while session.motion().phase() != Some(MotionPhase::Translate) {
        session.tick();
    }
    session.tick();
    let progress = session.motion().progress();
    let snapshot = session.clone();

    clock.toggle_pause();
    for ms in 0..100u64 {
        if clock.poll(t0 + Duration::from_millis(ms * 50), session.speed()) {
            session.tick();
        }
    }
    assert_eq!(session, snapshot);

    clock.toggle_pause();
    assert!(clock.poll(t0 + Duration::from_secs(10), session.speed()));
    session.tick();
    assert_eq!(session.motion().phase(), Some(MotionPhase::Translate));
    assert!(session.motion().progress() > progress);
}

#[test]
fn test_config_file_drives_session() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "discs = 4\nfps = 200\n\n[geometry]\npeg_height = 4.0").unwrap();

    let config = PuzzleConfig::from_file(file.path()).unwrap();
    let session = PuzzleSession::new(config).unwrap();
    assert_eq!(session.board().disc_count(), 4);
    assert_eq!(session.speed().fps(), 200);
    assert!((session.config().geometry().lift_height() - 4.2).abs() < 1e-12);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PuzzleConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read"));
}

// ── Tick bound ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_legal_move_lands_within_budget(
        requests in prop::collection::vec((0usize..3, 0usize..3), 1..25)
    ) {
        let mut session = PuzzleSession::with_discs(4).unwrap();
        let settings = *session.motion().settings();

        for (from, to) in requests {
            let before = session.clone();
            match session.request_move(from, to) {
                Ok(disc) => {
                    let flight = *session.motion().flight().unwrap();
                    let budget = settings.max_ticks(flight.start.z, flight.dest.z);
                    let ticks = land(&mut session);
                    prop_assert!(ticks <= budget, "{} ticks > budget {}", ticks, budget);
                    prop_assert_eq!(session.discs().pose(disc).unwrap().position, flight.dest);
                }
                Err(_) => prop_assert_eq!(&session, &before),
            }
            prop_assert!(RestingPosesInvariant::holds(&session));
        }
    }
}
