//! Utility Module
//!
//! - [`FpsCounter`]: frame rate measurement for the window title
//! - [`Timer`]: per-frame delta time

pub mod fps_counter;
pub mod time;

pub use fps_counter::FpsCounter;
pub use time::Timer;
