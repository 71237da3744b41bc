//! Swipe state machine
//!
//! [`transition`] is pure: it maps the current [`SwipeState`] and one
//! [`SwipeInput`] to the next state plus the effects the host must apply.
//! It knows nothing about time, rendering, or callbacks.
//!
//! ```text
//! Idle --Start--> Dragging --Release(commit)--> Committing --Settled--> Idle(-W)
//!                     |------Release/Cancel---> Cancelling --Settled--> Idle(0)
//! ```

use super::threshold::SwipeThreshold;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeState {
    /// At rest. `offset` is 0, or `-width` after a commit settled.
    Idle { offset: f32 },
    /// Following the pointer. `origin` is the offset when the drag began.
    Dragging { origin: f32, offset: f32 },
    /// Animating to the fully revealed position after a commit
    Committing,
    /// Animating back to 0
    Cancelling,
}

impl Default for SwipeState {
    fn default() -> Self {
        Self::Idle { offset: 0.0 }
    }
}

impl SwipeState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn is_settling(&self) -> bool {
        matches!(self, Self::Committing | Self::Cancelling)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeInput {
    /// Gesture activated. `offset` is the currently displayed offset.
    Start { offset: f32 },
    /// Horizontal translation since the gesture began
    Move { translation: f32 },
    /// Pointer released with the given horizontal velocity (units/s)
    Release { velocity: f32 },
    /// Host cancelled the gesture (e.g. a competing scroll took over)
    Cancel,
    /// The settle animation finished
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeEffect {
    /// Display this offset immediately
    SetOffset(f32),
    /// Animate the offset to this target
    AnimateTo(f32),
    /// Commit: the row was swiped away to the left
    SwipeLeft,
    /// The gesture ended without committing
    Cancelled,
}

/// Row geometry and commit policy for one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeContext {
    pub width: f32,
    pub threshold: SwipeThreshold,
}

impl SwipeContext {
    /// Clamp an offset into `[-width, 0]`.
    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(-self.width.max(0.0), 0.0)
    }
}

pub fn transition(state: SwipeState, input: SwipeInput, ctx: &SwipeContext) -> (SwipeState, Vec<SwipeEffect>) {
    match (state, input) {
        (SwipeState::Idle { .. } | SwipeState::Cancelling, SwipeInput::Start { offset }) => {
            let origin = ctx.clamp(offset);
            (SwipeState::Dragging { origin, offset: origin }, vec![SwipeEffect::SetOffset(origin)])
        }

        (SwipeState::Dragging { origin, .. }, SwipeInput::Move { translation }) => {
            let offset = ctx.clamp(origin + translation);
            (SwipeState::Dragging { origin, offset }, vec![SwipeEffect::SetOffset(offset)])
        }

        (SwipeState::Dragging { offset, .. }, SwipeInput::Release { velocity }) => {
            if ctx.threshold.should_commit(offset, velocity, ctx.width) {
                (
                    SwipeState::Committing,
                    vec![SwipeEffect::AnimateTo(-ctx.width.max(0.0)), SwipeEffect::SwipeLeft],
                )
            } else {
                cancel()
            }
        }

        (SwipeState::Dragging { .. }, SwipeInput::Cancel) => cancel(),

        (SwipeState::Committing, SwipeInput::Settled) => {
            (SwipeState::Idle { offset: -ctx.width.max(0.0) }, Vec::new())
        }
        (SwipeState::Cancelling, SwipeInput::Settled) => (SwipeState::Idle { offset: 0.0 }, Vec::new()),

        // Stray input: nothing is in flight, or a commit is already final.
        (state, _) => (state, Vec::new()),
    }
}

fn cancel() -> (SwipeState, Vec<SwipeEffect>) {
    (
        SwipeState::Cancelling,
        vec![SwipeEffect::AnimateTo(0.0), SwipeEffect::Cancelled],
    )
}
