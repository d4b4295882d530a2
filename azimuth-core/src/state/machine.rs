//! Compass display state machine
//!
//! Every delivered sample relabels the state from its status and pushes
//! exactly one text update to the display surface. There are no guarded
//! transitions: any state is reachable from any other on the next sample.

use crate::format::format;
use crate::heading::{CalibrationStatus, HeadingSample};
use crate::traits::DisplaySurface;

/// Text shown between construction and the first sample
pub const STARTUP_TEXT: &str = "Calibrating...";

/// Display states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// No sample processed yet, startup placeholder shown
    Initializing,
    /// Last sample reported unusable data
    Invalid,
    /// Last sample reported calibration in progress
    Calibrating,
    /// Last sample reported a trustworthy heading
    Calibrated,
    /// Last sample carried an unrecognized status
    Unknown,
}

impl DisplayState {
    /// State corresponding to a sample status
    pub fn from_status(status: CalibrationStatus) -> Self {
        match status {
            CalibrationStatus::DataInvalid => Self::Invalid,
            CalibrationStatus::Calibrating => Self::Calibrating,
            CalibrationStatus::Calibrated => Self::Calibrated,
            CalibrationStatus::Unknown => Self::Unknown,
        }
    }

    /// Check whether a heading number is currently on screen
    pub fn shows_heading(&self) -> bool {
        matches!(self, Self::Calibrating | Self::Calibrated)
    }
}

/// Tracks calibration status and drives the display
///
/// Owns the display surface handle for its lifetime; the surface itself
/// belongs to the application shell, which hands the handle over at
/// construction and takes it back at shutdown.
pub struct CompassMonitor<D: DisplaySurface> {
    state: DisplayState,
    surface: D,
}

impl<D: DisplaySurface> CompassMonitor<D> {
    /// Create a monitor and apply the startup placeholder
    pub fn new(mut surface: D) -> Self {
        surface.set_text(STARTUP_TEXT);
        Self {
            state: DisplayState::Initializing,
            surface,
        }
    }

    /// Process one delivered sample
    ///
    /// Relabels the state from the sample status and pushes exactly one
    /// text update. Never fails: unrecognized statuses render the
    /// formatter's default text.
    pub fn on_sample(&mut self, sample: HeadingSample) {
        self.state = DisplayState::from_status(sample.status);
        let text = format(sample.status, sample.raw_heading);
        self.surface.set_text(&text);
    }

    /// Current display state
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Release the display surface at shutdown
    pub fn into_surface(self) -> D {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DisplayText;
    use crate::heading::{from_degrees, FULL_CIRCLE};

    /// Surface double that records every text it receives
    struct RecordingSurface {
        texts: heapless::Vec<DisplayText, 8>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self {
                texts: heapless::Vec::new(),
            }
        }
    }

    impl DisplaySurface for RecordingSurface {
        fn set_text(&mut self, text: &str) {
            let mut owned = DisplayText::new();
            let _ = owned.push_str(text);
            self.texts.push(owned).unwrap();
        }
    }

    fn sample(status: CalibrationStatus, deg: u16) -> HeadingSample {
        HeadingSample::new(status, from_degrees(deg))
    }

    #[test]
    fn test_startup_placeholder_applied_once() {
        let monitor = CompassMonitor::new(RecordingSurface::new());
        assert_eq!(monitor.state(), DisplayState::Initializing);

        let surface = monitor.into_surface();
        assert_eq!(surface.texts.len(), 1);
        assert_eq!(surface.texts[0], "Calibrating...");
    }

    #[test]
    fn test_state_relabels_from_every_status() {
        let mut monitor = CompassMonitor::new(RecordingSurface::new());

        monitor.on_sample(sample(CalibrationStatus::Calibrated, 0));
        assert_eq!(monitor.state(), DisplayState::Calibrated);

        // No guard: straight back to Invalid is allowed
        monitor.on_sample(sample(CalibrationStatus::DataInvalid, 0));
        assert_eq!(monitor.state(), DisplayState::Invalid);

        monitor.on_sample(sample(CalibrationStatus::Calibrating, 0));
        assert_eq!(monitor.state(), DisplayState::Calibrating);

        monitor.on_sample(sample(CalibrationStatus::Unknown, 0));
        assert_eq!(monitor.state(), DisplayState::Unknown);
    }

    #[test]
    fn test_one_render_per_sample_in_order() {
        let mut monitor = CompassMonitor::new(RecordingSurface::new());

        monitor.on_sample(sample(CalibrationStatus::Calibrating, 10));
        monitor.on_sample(sample(CalibrationStatus::Calibrated, 90));
        monitor.on_sample(sample(CalibrationStatus::DataInvalid, 0));

        let surface = monitor.into_surface();
        // Startup placeholder plus one render per sample, in order
        assert_eq!(surface.texts.len(), 4);
        assert_eq!(surface.texts[1], "Compass\nCalibrating\n\nHeading: 10");
        assert_eq!(surface.texts[2], "Compass\nCalibrated\n\nHeading: 90");
        assert_eq!(surface.texts[3], "Move watch to calibrate");
    }

    #[test]
    fn test_identical_samples_render_identically() {
        let mut monitor = CompassMonitor::new(RecordingSurface::new());
        let s = HeadingSample::new(CalibrationStatus::Calibrated, FULL_CIRCLE / 4);

        monitor.on_sample(s);
        monitor.on_sample(s);

        let surface = monitor.into_surface();
        assert_eq!(surface.texts[1], surface.texts[2]);
    }

    #[test]
    fn test_shows_heading() {
        assert!(DisplayState::Calibrating.shows_heading());
        assert!(DisplayState::Calibrated.shows_heading());
        assert!(!DisplayState::Initializing.shows_heading());
        assert!(!DisplayState::Invalid.shows_heading());
        assert!(!DisplayState::Unknown.shows_heading());
    }
}
