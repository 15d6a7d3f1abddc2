//! Animation pacing: the target tick rate and the clock that decides when a
//! tick is due.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Slowest allowed tick rate.
pub const MIN_FPS: u32 = 2;
/// Fastest allowed tick rate.
pub const MAX_FPS: u32 = 1000;
/// Rate change per increase/decrease step.
pub const FPS_STEP: u32 = 20;
/// Tick rate of a fresh session.
pub const DEFAULT_FPS: u32 = 60;

/// Target tick rate, always within `[MIN_FPS, MAX_FPS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speed {
    fps: u32,
}

impl Speed {
    /// Creates a speed, clamping `fps` into range.
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.clamp(MIN_FPS, MAX_FPS),
        }
    }

    /// Ticks per second.
    pub fn fps(self) -> u32 {
        self.fps
    }

    /// Replaces the rate, clamping into range.
    #[instrument(skip(self), fields(from = self.fps))]
    pub fn set(&mut self, fps: u32) {
        *self = Self::new(fps);
        debug!(fps = self.fps, "Speed set");
    }

    /// One step faster, saturating at `MAX_FPS`.
    #[instrument(skip(self), fields(from = self.fps))]
    pub fn increase(&mut self) {
        self.fps = if self.fps > MAX_FPS - FPS_STEP {
            MAX_FPS
        } else {
            self.fps + FPS_STEP
        };
        debug!(fps = self.fps, "Speed increased");
    }

    /// One step slower. Anything at or below one step drops to `MIN_FPS`.
    #[instrument(skip(self), fields(from = self.fps))]
    pub fn decrease(&mut self) {
        self.fps = if self.fps <= FPS_STEP {
            MIN_FPS
        } else {
            self.fps - FPS_STEP
        };
        debug!(fps = self.fps, "Speed decreased");
    }

    /// Speed as a percentage, where `MAX_FPS / 2` reads as 100%.
    pub fn percent(self) -> f64 {
        self.fps as f64 / 5.0
    }

    /// Minimum time between two ticks, in whole milliseconds.
    pub fn frame_interval(self) -> Duration {
        Duration::from_millis(u64::from(1000 / self.fps))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

/// Decides when the next tick is due and tracks pause.
///
/// The clock does not sleep; the owner of the event loop polls it with the
/// current time and ticks the session whenever it answers `true`.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
    paused: bool,
}

impl FrameClock {
    /// Creates a running clock whose first poll is due immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether ticking is suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Suspends or resumes ticking. Returns the new paused state.
    #[instrument(skip(self))]
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        debug!(paused = self.paused, "Pause toggled");
        self.paused
    }

    /// Returns `true` (and records `now`) when a tick is due at `speed`.
    pub fn poll(&mut self, now: Instant, speed: Speed) -> bool {
        if self.paused {
            return false;
        }
        match self.last_tick {
            Some(last) if now.saturating_duration_since(last) < speed.frame_interval() => false,
            _ => {
                self.last_tick = Some(now);
                true
            }
        }
    }

    /// Time remaining until the next tick, zero if one is already due.
    pub fn until_due(&self, now: Instant, speed: Speed) -> Duration {
        match self.last_tick {
            Some(last) => speed
                .frame_interval()
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_clamps() {
        assert_eq!(Speed::new(0).fps(), MIN_FPS);
        assert_eq!(Speed::new(5000).fps(), MAX_FPS);
    }

    #[test]
    fn test_increase_saturates() {
        let mut speed = Speed::new(990);
        speed.increase();
        assert_eq!(speed.fps(), MAX_FPS);
        speed.increase();
        assert_eq!(speed.fps(), MAX_FPS);

        let mut speed = Speed::default();
        speed.increase();
        assert_eq!(speed.fps(), 80);
    }

    #[test]
    fn test_decrease_floors() {
        let mut speed = Speed::new(20);
        speed.decrease();
        assert_eq!(speed.fps(), MIN_FPS);

        let mut speed = Speed::default();
        speed.decrease();
        assert_eq!(speed.fps(), 40);
    }

    #[test]
    fn test_frame_interval_and_percent() {
        let speed = Speed::default();
        assert_eq!(speed.frame_interval(), Duration::from_millis(16));
        assert!((speed.percent() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_clock_gates_ticks() {
        let speed = Speed::new(100);
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        assert!(clock.poll(t0, speed));
        assert!(!clock.poll(t0 + Duration::from_millis(5), speed));
        assert!(clock.poll(t0 + Duration::from_millis(10), speed));
    }

    #[test]
    fn test_paused_clock_never_ticks() {
        let speed = Speed::new(100);
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        assert!(clock.toggle_pause());
        assert!(!clock.poll(t0 + Duration::from_secs(1), speed));
        assert!(!clock.toggle_pause());
        assert!(clock.poll(t0 + Duration::from_secs(2), speed));
    }
}
