//! Core UI functionality for the Swipetodo application.
//!
//! - [`actions`] - Actions flowing from row callbacks to the list
//! - [`component`] - Base component trait
//! - [`event_handler`] - Terminal event polling with a frame tick
//!
//! Components translate terminal input into [`Action`]s. Row callbacks send
//! their actions over a channel that the list drains on every update, so a
//! callback never needs a reference back into the list that owns the row.

pub mod actions;
pub mod component;
pub mod event_handler;

// Re-export core types for easier access from other modules
pub use actions::{Action, TaskId};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
