//! Headless runners: drain the animation without a terminal view.

use anyhow::{Result, bail};
use derive_getters::Getters;
use serde::Serialize;
use towers_core::{PegId, PuzzleConfig, PuzzleSession, move_count, solve};
use tracing::{info, instrument};

/// One move as it was animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// Source peg index.
    pub from: usize,
    /// Destination peg index.
    pub to: usize,
    /// Disc that moved.
    pub disc: usize,
}

/// Result of a full headless solve.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct SolveReport {
    discs: usize,
    moves: Vec<MoveRecord>,
    ticks: usize,
    /// Disc ids on each peg, bottom to top.
    pegs: Vec<Vec<usize>>,
}

/// Requests a solve and ticks the session until every disc has landed.
#[instrument(skip(session), fields(discs = session.board().disc_count()))]
pub fn drain_solution(session: &mut PuzzleSession) -> Result<SolveReport> {
    let queued = session.request_solve()?;
    let per_move = session.motion().settings().max_ticks(0.0, 0.0) + 1;
    let limit = (queued + 1).saturating_mul(per_move);

    let mut moves = Vec::with_capacity(queued);
    let mut ticks = 0;
    while session.is_busy() {
        if ticks >= limit {
            bail!("Animation did not finish within {} ticks", limit);
        }
        let report = session.tick();
        ticks += 1;
        if let Some(started) = report.started {
            let (from, to) = started.mv.indices();
            info!("From peg {} to peg {}", from, to);
            moves.push(MoveRecord {
                from,
                to,
                disc: started.disc.index(),
            });
        }
    }

    let pegs = session
        .board()
        .pegs()
        .iter()
        .map(|peg| peg.discs().map(|d| d.index()).collect())
        .collect();
    Ok(SolveReport {
        discs: session.board().disc_count(),
        moves,
        ticks,
        pegs,
    })
}

/// Runs the `solve` subcommand.
pub fn run_solve(config: PuzzleConfig, json: bool) -> Result<()> {
    let mut session = PuzzleSession::new(config)?;
    let report = drain_solution(&mut session)?;
    info!(moves = report.moves.len(), ticks = report.ticks, "Solve complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Solved {} discs in {} moves ({} ticks)",
            report.discs,
            report.moves.len(),
            report.ticks
        );
        for (index, discs) in report.pegs.iter().enumerate() {
            let listing: Vec<_> = discs.iter().map(usize::to_string).collect();
            println!("Peg {}: [{}]", index, listing.join(", "));
        }
    }
    Ok(())
}

/// Runs the `moves` subcommand.
#[instrument]
pub fn run_moves(discs: usize, json: bool) -> Result<()> {
    let moves = solve(discs, PegId::Left, PegId::Right)?;
    if let Some(expected) = u32::try_from(discs).ok().and_then(move_count) {
        info!(expected, "Move count");
    }

    if json {
        let pairs: Vec<_> = moves.iter().map(|mv| mv.indices()).collect();
        println!("{}", serde_json::to_string(&pairs)?);
    } else {
        for mv in &moves {
            println!("{}", mv);
        }
    }
    Ok(())
}
