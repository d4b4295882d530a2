//! Calibration state tracking and display updates

pub mod machine;

pub use machine::{CompassMonitor, DisplayState, STARTUP_TEXT};
