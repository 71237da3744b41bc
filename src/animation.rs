//! Time-based interpolation
//!
//! Nothing here reads the clock. Callers pass the frame's `Instant`, which
//! keeps every animation deterministic under test.

use std::time::{Duration, Instant};

/// Easing function for tweens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// A single scalar animation from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// A tween that is already at `value`.
    pub fn settled(value: f32, now: Instant) -> Self {
        Self::new(value, value, now, Duration::ZERO, Easing::Linear)
    }

    /// Linear progress in `[0, 1]`. Zero-length tweens are always complete.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        let t = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Restart towards `to` from wherever this tween currently is.
    pub fn retarget(&self, to: f32, now: Instant, duration: Duration) -> Self {
        Self::new(self.value_at(now), to, now, duration, self.easing)
    }
}
