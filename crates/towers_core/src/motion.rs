//! Motion interpolator: animates one disc from its old slot to its new one.
//!
//! A flight runs through three phases, one step per tick:
//!
//! 1. **Lift**: raise the disc straight up to the lift height.
//! 2. **Translate**: follow a cubic Hermite arc to above the destination peg,
//!    tilting the disc along its direction of travel.
//! 3. **Descend**: lay the disc flat and lower it onto the destination slot.
//!
//! The phase is stored on the flight itself so a paused session resumes
//! exactly where it stopped.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::board::Transfer;
use super::config::PuzzleConfig;
use super::discs::{DiscPose, DiscRegistry};
use super::geometry::Point3;
use super::types::{DiscId, RollDirection};

/// Fixed pacing of every flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSettings {
    /// Spline parameter increment per translate tick.
    pub step_u: f64,
    /// Z change per lift or descend tick.
    pub lift_step: f64,
    /// Height of the flight arc's endpoints.
    pub lift_height: f64,
}

impl MotionSettings {
    /// Reads pacing from a puzzle configuration.
    pub fn from_config(config: &PuzzleConfig) -> Self {
        Self {
            step_u: *config.step_u(),
            lift_step: *config.lift_step(),
            lift_height: config.geometry().lift_height(),
        }
    }

    /// Upper bound on the ticks a flight between slots at `start_z` and
    /// `dest_z` can take, one tick of slack per phase included.
    pub fn max_ticks(&self, start_z: f64, dest_z: f64) -> usize {
        let lift = ((self.lift_height - start_z).max(0.0) / self.lift_step).ceil() as usize;
        let translate = (1.0 / self.step_u).ceil() as usize;
        let descend = ((self.lift_height - dest_z).max(0.0) / self.lift_step).ceil() as usize;
        lift.saturating_add(translate)
            .saturating_add(descend)
            .saturating_add(3)
    }
}

/// Phase of the flight in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPhase {
    /// Rising from the source slot.
    Lift,
    /// Following the arc between pegs.
    Translate,
    /// Sinking onto the destination slot.
    Descend,
}

/// State of the single disc currently in the air.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Disc being animated.
    pub disc: DiscId,
    /// Slot the disc left.
    pub start: Point3,
    /// Slot the disc is heading for.
    pub dest: Point3,
    /// Spline parameter in `[0, 1]`.
    pub progress: f64,
    /// Current phase.
    pub phase: MotionPhase,
    /// Travel direction, for the rolling visual.
    pub direction: RollDirection,
}

/// What a tick did to the active move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionStep {
    /// Nothing in flight.
    Idle,
    /// The flying disc's pose changed.
    Moved,
    /// The disc touched down and the move is complete.
    Landed(DiscId),
}

impl MotionStep {
    /// Whether a disc pose changed.
    pub fn moved(self) -> bool {
        !matches!(self, MotionStep::Idle)
    }
}

/// The active-move record and the interpolator that advances it.
///
/// At most one flight exists at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveMove {
    settings: MotionSettings,
    flight: Option<Flight>,
}

impl ActiveMove {
    /// Creates an idle record.
    pub fn new(settings: MotionSettings) -> Self {
        Self {
            settings,
            flight: None,
        }
    }

    /// Pacing in use.
    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    /// Whether a disc is in the air.
    pub fn is_in_motion(&self) -> bool {
        self.flight.is_some()
    }

    /// The flight in progress.
    pub fn flight(&self) -> Option<&Flight> {
        self.flight.as_ref()
    }

    /// Disc being animated.
    pub fn disc(&self) -> Option<DiscId> {
        self.flight.map(|f| f.disc)
    }

    /// Spline parameter; `0` when idle.
    pub fn progress(&self) -> f64 {
        self.flight.map_or(0.0, |f| f.progress)
    }

    /// Current phase, `None` when idle.
    pub fn phase(&self) -> Option<MotionPhase> {
        self.flight.map(|f| f.phase)
    }

    /// Travel direction; stationary when idle.
    pub fn direction(&self) -> RollDirection {
        self.flight.map_or(RollDirection::Stationary, |f| f.direction)
    }

    /// Starts animating a committed transfer.
    #[instrument(skip(self, transfer), fields(disc = %transfer.disc, mv = %transfer.mv))]
    pub(crate) fn arm(&mut self, transfer: &Transfer) {
        let (from, to) = transfer.mv.indices();
        self.flight = Some(Flight {
            disc: transfer.disc,
            start: transfer.start,
            dest: transfer.dest,
            progress: 0.0,
            phase: MotionPhase::Lift,
            direction: RollDirection::between(from, to),
        });
        debug!("Flight armed");
    }

    /// Finishes the current flight immediately: the disc is laid flat on its
    /// destination slot.
    #[instrument(skip_all)]
    pub(crate) fn settle(&mut self, discs: &mut DiscRegistry) -> Option<DiscId> {
        let flight = self.flight.take()?;
        *discs.pose_mut(flight.disc) = DiscPose::resting(flight.dest);
        debug!(disc = %flight.disc, "Flight settled early");
        Some(flight.disc)
    }

    /// Drops the flight without touching any pose.
    pub(crate) fn clear(&mut self) {
        self.flight = None;
    }

    /// Advances the flight by one step, updating the disc's pose.
    pub fn tick(&mut self, discs: &mut DiscRegistry) -> MotionStep {
        let settings = self.settings;
        let Some(flight) = self.flight.as_mut() else {
            return MotionStep::Idle;
        };
        let pose = discs.pose_mut(flight.disc);

        match flight.phase {
            MotionPhase::Lift => {
                if pose.position.z < settings.lift_height {
                    pose.position.z = (pose.position.z + settings.lift_step).min(settings.lift_height);
                }
                if pose.position.z >= settings.lift_height {
                    flight.phase = MotionPhase::Translate;
                    debug!(disc = %flight.disc, "Lift complete");
                }
                MotionStep::Moved
            }
            MotionPhase::Translate => {
                flight.progress = (flight.progress + settings.step_u).min(1.0);
                let previous = pose.position;
                let next = hermite(flight.start, flight.dest, settings.lift_height, flight.progress);
                pose.position = next;
                pose.normal = (next - previous).normalized();
                if flight.progress >= 1.0 {
                    flight.phase = MotionPhase::Descend;
                    debug!(disc = %flight.disc, "Arc complete");
                }
                MotionStep::Moved
            }
            MotionPhase::Descend => {
                pose.normal = Point3::UP;
                let z = pose.position.z - settings.lift_step;
                if z > flight.dest.z {
                    pose.position.z = z;
                    return MotionStep::Moved;
                }
                pose.position = flight.dest;
                let disc = flight.disc;
                self.flight = None;
                debug!(%disc, "Disc landed");
                MotionStep::Landed(disc)
            }
        }
    }
}

/// Point on the flight arc at parameter `u ∈ [0, 1]`.
///
/// Endpoints sit at `lift_height` above the source and destination slots.
/// The start tangent points half-way across and steeply up, the end tangent
/// half-way across and steeply down, so the path bows upward.
pub fn hermite(start: Point3, dest: Point3, lift_height: f64, u: f64) -> Point3 {
    let mid_x = (start.x + dest.x) / 2.0;

    let p1 = Point3::new(start.x, start.y, lift_height);
    let p2 = Point3::new(dest.x, dest.y, lift_height);
    let t1 = Point3::new(mid_x - start.x, 0.0, 2.0 * lift_height);
    let t2 = Point3::new(dest.x - mid_x, 0.0, -2.0 * lift_height);

    let u2 = u * u;
    let u3 = u2 * u;
    let h0 = 2.0 * u3 - 3.0 * u2 + 1.0;
    let h1 = -2.0 * u3 + 3.0 * u2;
    let h2 = u3 - 2.0 * u2 + u;
    let h3 = u3 - u2;

    p1 * h0 + p2 * h1 + t1 * h2 + t2 * h3
}
