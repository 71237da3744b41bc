use crate::constants::VELOCITY_SAMPLE_WINDOW_MS;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Estimates pointer velocity from recent position samples.
///
/// Samples must arrive with non-decreasing timestamps; a sample older than
/// the newest one is dropped.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: VecDeque<(Instant, f32)>,
    window: Duration,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(VELOCITY_SAMPLE_WINDOW_MS))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            samples: VecDeque::new(),
            window,
        }
    }

    pub fn push(&mut self, at: Instant, position: f32) {
        if let Some(&(last, _)) = self.samples.back() {
            if at < last {
                return;
            }
        }
        self.samples.push_back((at, position));
        while let Some(&(first, _)) = self.samples.front() {
            if at.duration_since(first) > self.window && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in units per second over the window ending at `now`, 0 when
    /// fewer than two samples fall inside it.
    pub fn velocity(&self, now: Instant) -> f32 {
        let mut recent = self
            .samples
            .iter()
            .filter(|(at, _)| now.saturating_duration_since(*at) <= self.window);
        let Some(&(t0, p0)) = recent.next() else {
            return 0.0;
        };
        let Some(&(t1, p1)) = recent.last() else {
            return 0.0;
        };
        let dt = t1.duration_since(t0).as_secs_f32();
        if dt <= f32::EPSILON {
            return 0.0;
        }
        (p1 - p0) / dt
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}
