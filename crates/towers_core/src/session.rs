//! Puzzle session: the engine facade an event loop talks to.
//!
//! A session owns the board, the disc poses, the active move, the animation
//! driver, the speed setting and the light. Everything is mutated from
//! [`PuzzleSession::tick`] and the request methods; renderers only read.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::action::{MoveError, SolveError};
use super::board::Board;
use super::config::{ConfigError, PuzzleConfig};
use super::discs::DiscRegistry;
use super::driver::{AnimationDriver, StartedMove};
use super::executor;
use super::light::LightRig;
use super::motion::{ActiveMove, MotionSettings, MotionStep};
use super::solver::{MoveQueue, solve_into};
use super::speed::Speed;
use super::types::{DiscId, PegId};

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A disc pose changed or the light moved.
    pub redraw: bool,
    /// Move the driver started this tick.
    pub started: Option<StartedMove>,
    /// Disc that touched down this tick.
    pub landed: Option<DiscId>,
}

/// Complete puzzle state for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleSession {
    config: PuzzleConfig,
    board: Board,
    discs: DiscRegistry,
    motion: ActiveMove,
    driver: AnimationDriver,
    speed: Speed,
    light: LightRig,
}

impl PuzzleSession {
    /// Starts a game with every disc stacked on peg 0.
    #[instrument(skip(config), fields(discs = config.discs()))]
    pub fn new(config: PuzzleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(*config.discs(), config.geometry());
        let discs = DiscRegistry::from_board(&board);
        let motion = ActiveMove::new(MotionSettings::from_config(&config));
        let speed = Speed::new(*config.fps());
        let light = LightRig::new(config.light());
        info!("Puzzle session started");
        Ok(Self {
            config,
            board,
            discs,
            motion,
            driver: AnimationDriver::new(),
            speed,
            light,
        })
    }

    /// Starts a game with `discs` discs and default settings.
    pub fn with_discs(discs: usize) -> Result<Self, ConfigError> {
        Self::new(PuzzleConfig::with_disc_count(discs))
    }

    /// Puts every disc back on peg 0, cancelling any solve or flight.
    ///
    /// Speed and light are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new(*self.config.discs(), self.config.geometry());
        self.discs = DiscRegistry::from_board(&self.board);
        self.motion.clear();
        self.driver.stop();
        info!("Puzzle reset");
    }

    /// Configuration the session was built from.
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Peg occupancy.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Disc poses.
    pub fn discs(&self) -> &DiscRegistry {
        &self.discs
    }

    /// The in-flight move, if any.
    pub fn motion(&self) -> &ActiveMove {
        &self.motion
    }

    /// Moves still waiting to be animated.
    pub fn queue(&self) -> &MoveQueue {
        self.driver.queue()
    }

    /// Whether an auto-solve is running.
    pub fn is_solving(&self) -> bool {
        self.driver.is_active()
    }

    /// Whether the next tick has anything to do with the puzzle itself.
    pub fn is_busy(&self) -> bool {
        self.motion.is_in_motion() || self.driver.is_active()
    }

    /// Light source.
    pub fn light(&self) -> &LightRig {
        &self.light
    }

    /// Light source, for user interaction.
    pub fn light_mut(&mut self) -> &mut LightRig {
        &mut self.light
    }

    /// Current animation rate.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Sets the animation rate, clamped into range.
    pub fn set_speed(&mut self, fps: u32) -> Speed {
        self.speed.set(fps);
        debug!(fps = self.speed.fps(), "Speed set");
        self.speed
    }

    /// Raises the animation rate by one step.
    pub fn increase_speed(&mut self) -> Speed {
        self.speed.increase();
        self.speed
    }

    /// Lowers the animation rate by one step.
    pub fn decrease_speed(&mut self) -> Speed {
        self.speed.decrease();
        self.speed
    }

    /// Queues the full solution from peg 0 to peg 2 and starts animating it.
    ///
    /// Refused unless every disc rests on peg 0.
    #[instrument(skip(self))]
    pub fn request_solve(&mut self) -> Result<usize, SolveError> {
        if !self.board.is_start_layout() {
            return Err(SolveError::NotAtStart);
        }
        let count = solve_into(
            self.driver.queue_mut(),
            self.board.disc_count(),
            PegId::Left,
            PegId::Right,
        )?;
        self.driver.start();
        Ok(count)
    }

    /// Moves the top disc of `from` to `to` and starts its animation.
    ///
    /// A manual move cancels any running auto-solve. A refused request
    /// changes nothing.
    #[instrument(skip(self))]
    pub fn request_move(&mut self, from: usize, to: usize) -> Result<DiscId, MoveError> {
        let disc = executor::request_move(
            &mut self.board,
            &mut self.discs,
            &mut self.motion,
            from,
            to,
        )?;
        if self.driver.is_active() {
            info!("Manual move cancels auto-solve");
            self.driver.stop();
        }
        Ok(disc)
    }

    /// Advances the driver, then the interpolator and the light, by one step.
    pub fn tick(&mut self) -> TickReport {
        let started = self
            .driver
            .tick(&mut self.board, &mut self.discs, &mut self.motion);
        let step = self.motion.tick(&mut self.discs);
        let light_moved = self.light.tick();

        let landed = match step {
            MotionStep::Landed(disc) => {
                info!(%disc, "Move landed");
                Some(disc)
            }
            _ => None,
        };
        TickReport {
            redraw: step.moved() || light_moved || self.light.auto_motion(),
            started,
            landed,
        }
    }
}
