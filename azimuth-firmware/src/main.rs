//! Azimuth - Wrist Compass Firmware
//!
//! Main firmware binary for RP2040-based wrist compass boards. Reads a
//! QMC5883L magnetometer, classifies its calibration state, and renders
//! the heading on a UART character display.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use azimuth_core::config::CompassConfig;
use azimuth_core::format::format;
use azimuth_core::heading::CalibrationStatus;
use azimuth_core::traits::DisplaySurface;
use azimuth_drivers::mag::Qmc5883l;

use crate::display::ScreenHandle;

mod channels;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Azimuth firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Compass configuration: 10-degree delivery filter, 100ms poll
    let config = CompassConfig::default();

    // Setup UART for the display terminal
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();

    info!("UART initialized for display terminal");

    // Setup blocking I2C for the magnetometer
    // Pin assignments are board-specific (GY-271 header: SDA=GPIO4, SCL=GPIO5)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut sensor = Qmc5883l::new(i2c);

    spawner.spawn(tasks::display_tx_task(tx)).unwrap();

    match sensor.init() {
        Ok(()) => {
            info!("QMC5883L initialized");
            spawner.spawn(tasks::controller_task()).unwrap();
            spawner.spawn(tasks::compass_task(sensor, config)).unwrap();
        }
        Err(e) => {
            // Sensor subscription failures are the shell's problem, not
            // the monitor's: show the calibrate prompt and keep the
            // display path alive so the message actually renders
            error!("QMC5883L probe failed: {:?}", e);
            let text = format(CalibrationStatus::DataInvalid, 0);
            ScreenHandle.set_text(&text);
        }
    }

    info!("Startup complete, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
