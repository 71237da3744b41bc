use std::time::Duration;

/// Decides whether a released swipe commits.
///
/// The commit distance is `commit_fraction` of the row width, never less
/// than `min_distance` and never more than the width itself. A row with no
/// width can never commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThreshold {
    pub commit_fraction: f32,
    pub min_distance: f32,
    /// How far ahead the release velocity is projected. Zero disables it.
    pub velocity_projection: Duration,
}

impl SwipeThreshold {
    /// Leftward distance, in columns, needed to commit on a row of `width`.
    pub fn commit_distance(&self, width: f32) -> Option<f32> {
        if width.is_nan() || width <= 0.0 {
            return None;
        }
        let distance = (width * self.commit_fraction).max(self.min_distance).min(width);
        (distance > 0.0).then_some(distance)
    }

    /// Offset after adding the projected travel of `velocity` (units/s).
    pub fn projected_offset(&self, offset: f32, velocity: f32) -> f32 {
        (offset + velocity * self.velocity_projection.as_secs_f32()).min(0.0)
    }

    pub fn should_commit(&self, offset: f32, velocity: f32, width: f32) -> bool {
        match self.commit_distance(width) {
            Some(distance) => self.projected_offset(offset, velocity) <= -distance,
            None => false,
        }
    }
}

impl Default for SwipeThreshold {
    fn default() -> Self {
        Self {
            commit_fraction: crate::constants::SWIPE_DEFAULT_COMMIT_FRACTION,
            min_distance: crate::constants::SWIPE_DEFAULT_MIN_COMMIT_DISTANCE,
            velocity_projection: Duration::from_millis(crate::constants::SWIPE_DEFAULT_VELOCITY_PROJECTION_MS),
        }
    }
}
