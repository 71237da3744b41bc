//! UI module for Swipetodo
//!
//! This module handles the terminal front end: the component tree, the
//! event loop, and rendering.

pub mod app;
pub mod components;
pub mod core;
pub mod renderer;

pub use app::App;
pub use renderer::run_app;
