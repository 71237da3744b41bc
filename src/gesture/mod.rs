//! Swipe gesture engine
//!
//! Converts a horizontal pan into a row-level outcome: snap back, or commit
//! to the left and reveal the delete action.
//!
//! - [`recognizer`] - pan activation, axis lock and tap detection
//! - [`arbiter`] - coordination with sibling recognizers (e.g. list scrolling)
//! - [`velocity`] - release velocity estimation
//! - [`threshold`] - commit policy
//! - [`state`] - the pure swipe state machine
//! - [`engine`] - [`SwipeEngine`], which drives all of the above

pub mod arbiter;
pub mod engine;
pub mod recognizer;
pub mod state;
pub mod threshold;
pub mod velocity;

pub use arbiter::{HandlerId, SimultaneousHandlers};
pub use engine::{GestureResponse, SwipeEngine};
pub use recognizer::{Axis, PanEvent, PanRecognizer};
pub use state::{transition, SwipeContext, SwipeEffect, SwipeInput, SwipeState};
pub use threshold::SwipeThreshold;
pub use velocity::VelocityTracker;
