//! Configuration type definitions

use crate::filter::HeadingFilter;

/// Compass sampling and delivery configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompassConfig {
    /// Minimum heading change between delivered samples (degrees)
    pub filter_threshold_deg: u16,
    /// Sensor polling interval (milliseconds)
    pub sample_interval_ms: u32,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            filter_threshold_deg: 10,
            sample_interval_ms: 100,
        }
    }
}

impl CompassConfig {
    /// Build the delivery filter for this configuration
    pub fn filter(&self) -> HeadingFilter {
        HeadingFilter::from_degrees(self.filter_threshold_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::{from_degrees, CalibrationStatus, HeadingSample};

    #[test]
    fn test_default_threshold_is_ten_degrees() {
        let config = CompassConfig::default();
        let mut filter = config.filter();

        let first = HeadingSample::new(CalibrationStatus::Calibrated, 0);
        assert!(filter.accept(first));

        let nine = HeadingSample::new(CalibrationStatus::Calibrated, from_degrees(9));
        assert!(!filter.accept(nine));

        let ten = HeadingSample::new(CalibrationStatus::Calibrated, from_degrees(10));
        assert!(filter.accept(ten));
    }
}
