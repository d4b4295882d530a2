//! Display text formatting
//!
//! Pure conversion from a calibration status + raw heading to the text
//! block shown on the display. Output is capped at [`DISPLAY_TEXT_CAP`]
//! characters; overlong output is clipped, never an error.

use core::fmt::{self, Write};

use heapless::String;

use crate::heading::{to_degrees, CalibrationStatus};

/// Display text capacity in characters
pub const DISPLAY_TEXT_CAP: usize = 32;

/// Text block for the display, fixed capacity
pub type DisplayText = String<DISPLAY_TEXT_CAP>;

/// Writer that clips at capacity instead of failing
struct Clipped<'a>(&'a mut DisplayText);

impl Write for Clipped<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format a heading sample for the display
///
/// The heading is only meaningful for `Calibrating` and `Calibrated`;
/// other statuses ignore it. Unrecognized statuses fall through to a
/// default message instead of erroring.
pub fn format(status: CalibrationStatus, raw_heading: u32) -> DisplayText {
    let mut text = DisplayText::new();
    let mut out = Clipped(&mut text);

    match status {
        CalibrationStatus::DataInvalid => {
            let _ = out.write_str("Move watch to calibrate");
        }
        CalibrationStatus::Calibrating => {
            let _ = write!(
                out,
                "Compass\nCalibrating\n\nHeading: {}",
                to_degrees(raw_heading)
            );
        }
        CalibrationStatus::Calibrated => {
            let _ = write!(
                out,
                "Compass\nCalibrated\n\nHeading: {}",
                to_degrees(raw_heading)
            );
        }
        _ => {
            let _ = out.write_str("Compass Data Unknown");
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::FULL_CIRCLE;

    use proptest::prelude::*;

    #[test]
    fn test_data_invalid_ignores_heading() {
        assert_eq!(
            format(CalibrationStatus::DataInvalid, 0),
            "Move watch to calibrate"
        );
        assert_eq!(
            format(CalibrationStatus::DataInvalid, FULL_CIRCLE - 1),
            "Move watch to calibrate"
        );
    }

    #[test]
    fn test_unknown_ignores_heading() {
        assert_eq!(format(CalibrationStatus::Unknown, 0), "Compass Data Unknown");
        assert_eq!(
            format(CalibrationStatus::Unknown, 12345),
            "Compass Data Unknown"
        );
    }

    #[test]
    fn test_calibrating_quarter_turn() {
        // 16384 raw units = 90 degrees
        assert_eq!(
            format(CalibrationStatus::Calibrating, 16384),
            "Compass\nCalibrating\n\nHeading: 90"
        );
    }

    #[test]
    fn test_calibrated_template() {
        assert_eq!(
            format(CalibrationStatus::Calibrated, 0),
            "Compass\nCalibrated\n\nHeading: 0"
        );
        assert_eq!(
            format(CalibrationStatus::Calibrated, FULL_CIRCLE / 2),
            "Compass\nCalibrated\n\nHeading: 180"
        );
    }

    #[test]
    fn test_boundary_degrees() {
        assert_eq!(
            format(CalibrationStatus::Calibrated, FULL_CIRCLE - 1),
            "Compass\nCalibrated\n\nHeading: 359"
        );
    }

    #[test]
    fn test_calibrating_clips_at_capacity() {
        // The calibrating template with a three-digit heading is 33 chars;
        // the final digit is clipped rather than overflowing the slot.
        let text = format(CalibrationStatus::Calibrating, FULL_CIRCLE - 1);
        assert_eq!(text.len(), DISPLAY_TEXT_CAP);
        assert_eq!(text, "Compass\nCalibrating\n\nHeading: 35");
    }

    proptest! {
        #[test]
        fn prop_calibrated_degrees_in_range(raw in 0u32..FULL_CIRCLE) {
            let text = format(CalibrationStatus::Calibrated, raw);
            let degrees: u32 = text
                .rsplit(' ')
                .next()
                .unwrap()
                .parse()
                .unwrap();
            prop_assert_eq!(degrees, raw * 360 / FULL_CIRCLE);
            prop_assert!(degrees < 360);
        }

        #[test]
        fn prop_output_never_exceeds_capacity(raw in 0u32..FULL_CIRCLE, status in 0u8..8) {
            let status = CalibrationStatus::from_raw(status);
            prop_assert!(format(status, raw).len() <= DISPLAY_TEXT_CAP);
        }
    }
}
