//! Utility modules for the Swipetodo application.
//!
//! - [`color`] - Colour parsing and interpolation used by the theme and animations

pub mod color;
