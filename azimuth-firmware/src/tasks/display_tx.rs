//! Display UART transmit task
//!
//! Writes each published text block to the UART character terminal,
//! preceded by a form feed so the terminal shows one block at a time.

use defmt::*;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::SCREEN_TEXT;
use crate::display::FORM_FEED;

/// Display TX task - sends text blocks to the terminal
#[embassy_executor::task]
pub async fn display_tx_task(mut tx: BufferedUartTx<'static, UART0>) {
    info!("Display TX task started");

    loop {
        let text = SCREEN_TEXT.wait().await;

        if let Err(e) = tx.write_all(&[FORM_FEED]).await {
            warn!("Failed to clear terminal: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(text.as_bytes()).await {
            warn!("Failed to send text: {:?}", e);
        }
    }
}
