//! Constants used throughout the application
//!
//! This module centralizes default values, glyphs, and UI text so the
//! configuration layer and the components agree on them.

// Swipe defaults
/// Fraction of the row width a leftward swipe must cover to commit
pub const SWIPE_DEFAULT_COMMIT_FRACTION: f32 = 0.5;
/// Absolute commit distance in columns, used as a floor for narrow rows
pub const SWIPE_DEFAULT_MIN_COMMIT_DISTANCE: f32 = 4.0;
/// How far ahead the release velocity is projected, in milliseconds
pub const SWIPE_DEFAULT_VELOCITY_PROJECTION_MS: u64 = 100;
/// Movement (in columns/rows) before a pan gesture activates
pub const SWIPE_DEFAULT_ACTIVATION_SLOP: f32 = 2.0;
/// Duration of the settle animation after release
pub const SWIPE_DEFAULT_SETTLE_MS: u64 = 180;
/// Velocity samples older than this are ignored
pub const VELOCITY_SAMPLE_WINDOW_MS: u64 = 100;

// Checkbox and label defaults
pub const CHECKBOX_DEFAULT_ANIMATION_MS: u64 = 150;
pub const LABEL_DEFAULT_ANIMATION_MS: u64 = 200;
pub const LABEL_DEFAULT_PLACEHOLDER: &str = "Task";

/// Upper bound for any configured animation
pub const ANIMATION_MAX_MS: u64 = 5_000;

// UI Layout Constants
/// Columns taken by the checkbox control, including its right margin
pub const CHECKBOX_WIDTH: u16 = 4;
/// Horizontal padding on both sides of the row content
pub const ROW_PADDING_X: u16 = 1;
/// Default tick rate of the event loop
pub const UI_DEFAULT_TICK_RATE_MS: u64 = 16;

// Glyphs
pub const GLYPH_CHECKBOX_UNCHECKED: &str = "[ ]";
pub const GLYPH_CHECKMARK: &str = "x";
pub const GLYPH_TRASH: &str = "✕";

// Status messages
pub const STATUS_HINTS: &str = "drag left: delete  space: toggle  enter: edit  a: add  q: quit";
pub const LOG_TASK_REMOVED: &str = "Removed task";
pub const LOG_TASK_TOGGLED: &str = "Toggled task";
pub const LOG_TASK_RENAMED: &str = "Renamed task";

/// Maximum number of entries kept by the in-memory event log
pub const LOG_BUFFER_CAPACITY: usize = 200;
