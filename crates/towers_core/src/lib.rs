//! Towers of Hanoi puzzle engine - board state, solver and disc animation
//!
//! This library holds everything about the puzzle that is not drawing:
//! the peg occupancy model, move legality, the recursive solver, and the
//! tick-driven interpolator that flies a disc from one peg to another.
//!
//! # Architecture
//!
//! - **Board**: three pegs with fixed slot positions and occupancy stacks
//! - **Discs**: the pose (position and facing) of every disc
//! - **Solver**: recursive solution as a queue of peg-to-peg moves
//! - **Executor**: validates and commits a single move, then arms the animation
//! - **Motion**: lift, Hermite arc and descend, one step per tick
//! - **Driver**: feeds queued moves to the executor as each flight lands
//! - **Session**: the facade an event loop ticks and renders from
//!
//! # Example
//!
//! ```
//! use towers_core::PuzzleSession;
//!
//! let mut session = PuzzleSession::with_discs(3).unwrap();
//! session.request_solve().unwrap();
//! while session.is_busy() {
//!     session.tick();
//! }
//! assert_eq!(session.board().peg(towers_core::PegId::Right).discs().count(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod config;
mod discs;
mod driver;
mod executor;
mod geometry;
mod light;
mod motion;
mod session;
mod solver;
mod speed;
mod types;

// Public so callers can check and compose invariants themselves
pub mod contracts;
pub mod invariants;

// Crate-level exports - Errors
pub use action::{MoveError, SolveError};

// Crate-level exports - Configuration
pub use config::{BoardGeometry, ConfigError, LightConfig, PuzzleConfig};

// Crate-level exports - Board and discs
pub use board::{Board, Peg, Transfer};
pub use discs::{DiscColor, DiscPose, DiscRegistry};
pub use geometry::Point3;
pub use types::{DiscId, Move, PEG_COUNT, PegId, RollDirection};

// Crate-level exports - Solving and animation
pub use driver::{AnimationDriver, StartedMove};
pub use executor::request_move;
pub use motion::{ActiveMove, Flight, MotionPhase, MotionSettings, MotionStep, hermite};
pub use solver::{MAX_SOLVE_DISCS, MoveQueue, move_count, solve, solve_into};

// Crate-level exports - Session
pub use light::LightRig;
pub use session::{PuzzleSession, TickReport};
pub use speed::{DEFAULT_FPS, FPS_STEP, FrameClock, MAX_FPS, MIN_FPS, Speed};
