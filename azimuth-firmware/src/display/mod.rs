//! Display plumbing
//!
//! The display is a dumb UART character terminal: the controller task
//! publishes the latest text block and the TX task writes it out with a
//! form feed so the terminal always shows exactly one block.

use azimuth_core::format::DisplayText;
use azimuth_core::traits::DisplaySurface;

use crate::channels::SCREEN_TEXT;

/// ASCII form feed, clears the terminal before each block
pub const FORM_FEED: u8 = 0x0C;

/// Handle the compass monitor writes through
///
/// Publishing never blocks: the signal holds the latest text and the TX
/// task catches up when the UART is free.
pub struct ScreenHandle;

impl DisplaySurface for ScreenHandle {
    fn set_text(&mut self, text: &str) {
        let mut owned = DisplayText::new();
        let _ = owned.push_str(text);
        SCREEN_TEXT.signal(owned);
    }
}
