//! Swipetodo - a to-do list whose rows are swiped away to delete them
//!
//! The interesting part is the row interaction model: a pan gesture that
//! either snaps back or commits to the left, an optimistic checkbox, and a
//! label that turns into a text field while editing. All of it is driven by
//! explicit timestamps and renders into a ratatui buffer, so it runs the same
//! under the terminal front end and under test.
//!
//! # Modules
//!
//! * [`gesture`] - Swipe recognition, arbitration and the swipe state machine
//! * [`ui`] - Row components, the task list and the terminal front end
//! * [`theme`] - Colour resolution for light and dark modes
//! * [`animation`] - Easing and tweens
//! * [`config`] - Application configuration management
//! * [`logger`] - File logging and the in-memory event log

/// Easing functions and time-based tweens
pub mod animation;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Swipe gesture engine
pub mod gesture;

/// Logging utilities
pub mod logger;

/// Colour resolution for the current display mode
pub mod theme;

/// Terminal user interface components and rendering
pub mod ui;

/// Colour helpers
pub mod utils;
