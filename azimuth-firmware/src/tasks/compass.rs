//! Compass sensor polling task
//!
//! Polls the magnetometer on a fixed interval, applies the heading
//! delivery filter, and forwards accepted samples to the controller.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};

use azimuth_core::config::CompassConfig;
use azimuth_core::traits::{HeadingSensor, SensorError};
use azimuth_drivers::mag::Qmc5883l;

use crate::channels::SAMPLE_CHANNEL;

/// Compass task - reads the magnetometer and feeds the sample channel
#[embassy_executor::task]
pub async fn compass_task(
    mut sensor: Qmc5883l<I2c<'static, I2C0, Blocking>>,
    config: CompassConfig,
) {
    info!(
        "Compass task started ({}deg filter, {}ms interval)",
        config.filter_threshold_deg, config.sample_interval_ms
    );

    let mut filter = config.filter();
    let mut ticker = Ticker::every(Duration::from_millis(config.sample_interval_ms as u64));

    loop {
        match sensor.read_heading() {
            Ok(sample) => {
                if filter.accept(sample) {
                    trace!("Sample delivered: {:?}", sample);
                    SAMPLE_CHANNEL.send(sample).await;
                }
            }
            Err(SensorError::NotReady) => {
                // Conversions run at 50 Hz against a slower poll; the
                // next tick will have fresh data
                trace!("Sensor not ready");
            }
            Err(e) => {
                warn!("Sensor read failed: {:?}", e);
            }
        }

        ticker.next().await;
    }
}
