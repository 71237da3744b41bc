//! Swipe engine: pointer input in, animated offset and outcomes out
//!
//! Drives a [`PanRecognizer`] and the pure [`transition`] function from raw
//! pointer events, tracks release velocity, animates the settle, and fires
//! `on_swipe_left` exactly once per committed gesture.

use super::arbiter::{HandlerId, SimultaneousHandlers};
use super::recognizer::{Axis, PanEvent, PanRecognizer};
use super::state::{transition, SwipeContext, SwipeEffect, SwipeInput, SwipeState};
use super::threshold::SwipeThreshold;
use super::velocity::VelocityTracker;
use crate::animation::{Easing, Tween};
use crate::config::SwipeConfig;
use std::time::{Duration, Instant};

/// What a pointer event amounted to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureResponse {
    None,
    /// The pointer was released without a pan; position of the press
    Tap { x: f32, y: f32 },
    /// The gesture committed and `on_swipe_left` fired
    Committed,
    /// The gesture ended below the threshold or was cancelled
    Cancelled,
}

pub struct SwipeEngine {
    state: SwipeState,
    recognizer: PanRecognizer,
    velocity: VelocityTracker,
    offset: Tween,
    width: f32,
    threshold: SwipeThreshold,
    settle_duration: Duration,
    handler: Option<(SimultaneousHandlers, HandlerId)>,
    on_swipe_left: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for SwipeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeEngine")
            .field("state", &self.state)
            .field("width", &self.width)
            .field("handler", &self.handler.as_ref().map(|(_, id)| id))
            .finish_non_exhaustive()
    }
}

impl SwipeEngine {
    pub fn new(config: &SwipeConfig, now: Instant) -> Self {
        Self {
            state: SwipeState::default(),
            recognizer: PanRecognizer::new(Axis::Horizontal, config.activation_slop),
            velocity: VelocityTracker::new(),
            offset: Tween::settled(0.0, now),
            width: 0.0,
            threshold: config.threshold(),
            settle_duration: config.settle_duration(),
            handler: None,
            on_swipe_left: None,
        }
    }

    /// Join the arbiter shared with sibling recognizers.
    pub fn with_simultaneous_handlers(mut self, handlers: SimultaneousHandlers) -> Self {
        self.attach(handlers);
        self
    }

    pub fn attach(&mut self, handlers: SimultaneousHandlers) {
        self.detach();
        let id = handlers.register(Axis::Horizontal);
        self.handler = Some((handlers, id));
    }

    fn detach(&mut self) {
        if let Some((handlers, id)) = self.handler.take() {
            handlers.unregister(id);
        }
    }

    pub fn handler_id(&self) -> Option<HandlerId> {
        self.handler.as_ref().map(|(_, id)| *id)
    }

    pub fn set_on_swipe_left(&mut self, callback: Option<Box<dyn FnMut()>>) {
        self.on_swipe_left = callback;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
        if let SwipeState::Dragging { origin, offset } = self.state {
            let ctx = self.context();
            self.state = SwipeState::Dragging {
                origin: ctx.clamp(origin),
                offset: ctx.clamp(offset),
            };
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn state(&self) -> SwipeState {
        self.state
    }

    /// Displayed offset at `now`, in `[-width, 0]`
    pub fn offset(&self, now: Instant) -> f32 {
        self.context().clamp(self.offset.value_at(now))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.state.is_settling() && !self.offset.is_finished(now)
    }

    /// Start a pointer sequence. A drag still open from a sequence whose
    /// release was never delivered is cancelled first.
    pub fn pointer_down(&mut self, x: f32, y: f32, now: Instant) -> GestureResponse {
        // A commit is final; the row is about to go away.
        if self.state == SwipeState::Committing {
            return GestureResponse::None;
        }
        let response = if self.state.is_dragging() {
            log::warn!("Swipe release was lost; cancelling the open drag");
            self.release_claim();
            self.apply(SwipeInput::Cancel, now)
        } else {
            GestureResponse::None
        };
        self.recognizer.pointer_down(x, y);
        self.velocity.reset();
        self.velocity.push(now, x);
        response
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, now: Instant) -> GestureResponse {
        if self.recognizer.is_tracking() {
            self.velocity.push(now, x);
        }

        match self.recognizer.pointer_move(x, y) {
            PanEvent::Began { translation } => {
                if !self.claim() {
                    self.recognizer.fail();
                    return GestureResponse::None;
                }
                let displayed = self.offset(now);
                self.apply(SwipeInput::Start { offset: displayed }, now);
                self.apply(SwipeInput::Move { translation }, now)
            }
            PanEvent::Changed { translation } => self.apply(SwipeInput::Move { translation }, now),
            _ => GestureResponse::None,
        }
    }

    /// End the pointer sequence at `(x, y)`. The release position is the
    /// last velocity sample, so a pointer held still before release has no
    /// velocity left.
    pub fn pointer_up(&mut self, x: f32, y: f32, now: Instant) -> GestureResponse {
        if self.recognizer.is_tracking() {
            self.velocity.push(now, x);
        }
        match self.recognizer.pointer_up() {
            PanEvent::Ended => {
                let velocity = self.velocity.velocity(now);
                self.release_claim();
                self.apply(SwipeInput::Release { velocity }, now)
            }
            PanEvent::Tap { x, y } => GestureResponse::Tap { x, y },
            _ => GestureResponse::None,
        }
    }

    /// Host cancellation, e.g. the terminal was resized or lost focus.
    /// Resolves an in-flight drag exactly like a release below the threshold.
    pub fn cancel(&mut self, now: Instant) -> GestureResponse {
        self.recognizer.fail();
        self.recognizer.pointer_up();
        self.release_claim();
        self.apply(SwipeInput::Cancel, now)
    }

    /// Advance the settle animation.
    pub fn tick(&mut self, now: Instant) {
        if self.state.is_settling() && self.offset.is_finished(now) {
            self.apply(SwipeInput::Settled, now);
        }
    }

    /// Put the row back at rest, e.g. when a parent reuses it after a commit.
    pub fn reset(&mut self, now: Instant) {
        self.recognizer.fail();
        self.recognizer.pointer_up();
        self.release_claim();
        self.state = SwipeState::default();
        self.offset = Tween::settled(0.0, now);
    }

    fn context(&self) -> SwipeContext {
        SwipeContext {
            width: self.width,
            threshold: self.threshold,
        }
    }

    fn claim(&self) -> bool {
        match &self.handler {
            Some((handlers, id)) => handlers.try_activate(*id),
            None => true,
        }
    }

    fn release_claim(&self) {
        if let Some((handlers, id)) = &self.handler {
            handlers.deactivate(*id);
        }
    }

    fn apply(&mut self, input: SwipeInput, now: Instant) -> GestureResponse {
        let ctx = self.context();
        let (next, effects) = transition(self.state, input, &ctx);
        if next != self.state {
            log::debug!("Swipe {:?} --{:?}--> {:?}", self.state, input, next);
        }
        self.state = next;

        let mut response = GestureResponse::None;
        for effect in effects {
            match effect {
                SwipeEffect::SetOffset(offset) => self.offset = Tween::settled(offset, now),
                SwipeEffect::AnimateTo(target) => {
                    self.offset = Tween::new(
                        self.offset.value_at(now),
                        target,
                        now,
                        self.settle_duration,
                        Easing::EaseOut,
                    );
                }
                SwipeEffect::SwipeLeft => {
                    if let Some(callback) = self.on_swipe_left.as_mut() {
                        callback();
                    }
                    response = GestureResponse::Committed;
                }
                SwipeEffect::Cancelled => response = GestureResponse::Cancelled,
            }
        }
        response
    }
}

impl Drop for SwipeEngine {
    fn drop(&mut self) {
        self.detach();
    }
}
