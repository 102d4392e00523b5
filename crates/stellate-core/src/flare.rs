//! Selection flare: a short scale-up / scale-down pulse.
//!
//! The flare is a pure function of time. It holds the instant it started and
//! the scale it started from, and the presentation layer samples it every
//! frame. Nothing waits on it.

use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Peak scale factor.
pub const FLARE_SCALE: f64 = 1.6;
/// Duration of the scale-up step.
pub const FLARE_UP_DURATION: Duration = Duration::from_millis(300);
/// Duration of the scale-down step.
pub const FLARE_DOWN_DURATION: Duration = Duration::from_millis(100);

/// Which step of the sequence a flare is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlarePhase {
    ScalingUp,
    ScalingDown,
    Finished,
}

/// A running flare animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flare {
    started: Instant,
    from_scale: f64,
}

impl Flare {
    /// Start a flare from identity.
    pub fn start(now: Instant) -> Self {
        Self {
            started: now,
            from_scale: 1.0,
        }
    }

    /// Start a flare that replaces `previous`, continuing from whatever scale
    /// `previous` shows at `now`.
    pub fn restart(previous: Option<&Flare>, now: Instant) -> Self {
        Self {
            started: now,
            from_scale: previous.map_or(1.0, |flare| flare.scale_at(now)),
        }
    }

    /// Instant the flare started.
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Phase at the given instant.
    pub fn phase_at(&self, now: Instant) -> FlarePhase {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed < FLARE_UP_DURATION {
            FlarePhase::ScalingUp
        } else if elapsed < FLARE_UP_DURATION + FLARE_DOWN_DURATION {
            FlarePhase::ScalingDown
        } else {
            FlarePhase::Finished
        }
    }

    /// Uniform scale factor at the given instant.
    pub fn scale_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        match self.phase_at(now) {
            FlarePhase::ScalingUp => {
                let t = elapsed.as_secs_f64() / FLARE_UP_DURATION.as_secs_f64();
                lerp(self.from_scale, FLARE_SCALE, ease_in_out(t))
            }
            FlarePhase::ScalingDown => {
                let t = (elapsed - FLARE_UP_DURATION).as_secs_f64()
                    / FLARE_DOWN_DURATION.as_secs_f64();
                lerp(FLARE_SCALE, 1.0, ease_in_out(t))
            }
            FlarePhase::Finished => 1.0,
        }
    }

    /// Whether the sequence has completed.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.phase_at(now) == FlarePhase::Finished
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Smoothstep easing, clamped to [0, 1].
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
