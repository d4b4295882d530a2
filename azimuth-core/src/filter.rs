//! Heading-change delivery filter
//!
//! The sensor samples far faster than the display is worth updating. The
//! filter suppresses samples whose heading moved less than a configured
//! threshold since the last delivered sample. Status changes always
//! pass: a calibration transition must reach the display even when the
//! wearer holds perfectly still.

use crate::heading::{angular_distance, from_degrees, HeadingSample};

/// Suppresses samples until the heading has moved far enough
pub struct HeadingFilter {
    /// Minimum delivered heading change, raw angular units
    threshold: u32,
    /// Last delivered sample; suppressed samples do not update this
    last: Option<HeadingSample>,
}

impl HeadingFilter {
    /// Create a filter with a threshold in raw angular units
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            last: None,
        }
    }

    /// Create a filter with a threshold in whole degrees
    pub fn from_degrees(degrees: u16) -> Self {
        Self::new(from_degrees(degrees))
    }

    /// Decide whether a sample should be delivered
    ///
    /// The first sample, any status change, and any heading change at or
    /// above the threshold are delivered. Delivered samples become the
    /// new reference point.
    pub fn accept(&mut self, sample: HeadingSample) -> bool {
        let deliver = match self.last {
            None => true,
            Some(prev) => {
                prev.status != sample.status
                    || angular_distance(prev.raw_heading, sample.raw_heading) >= self.threshold
            }
        };

        if deliver {
            self.last = Some(sample);
        }
        deliver
    }

    /// Forget the reference sample; the next sample is always delivered
    pub fn reset(&mut self) {
        self.last = None;
    }
}
