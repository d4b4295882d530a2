//! Hardware abstraction traits
//!
//! These traits define the interface between the compass logic and the
//! collaborators that own real hardware.

pub mod display;
pub mod sensor;

pub use display::DisplaySurface;
pub use sensor::{HeadingSensor, SensorError};
