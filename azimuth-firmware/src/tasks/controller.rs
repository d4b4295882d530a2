//! Main controller task
//!
//! Owns the compass monitor: consumes delivered samples and pushes the
//! rendered text to the display surface. The startup placeholder goes
//! up before the first sample arrives.

use defmt::*;

use azimuth_core::state::CompassMonitor;

use crate::channels::SAMPLE_CHANNEL;
use crate::display::ScreenHandle;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task() {
    info!("Controller task started");

    // Applies the startup placeholder as a side effect
    let mut monitor = CompassMonitor::new(ScreenHandle);

    loop {
        let sample = SAMPLE_CHANNEL.receive().await;
        debug!("Sample: {:?}", sample);

        monitor.on_sample(sample);
        trace!("Display state: {:?}", monitor.state());
    }
}
