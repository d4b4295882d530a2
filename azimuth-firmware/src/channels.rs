//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use azimuth_core::format::DisplayText;
use azimuth_core::heading::HeadingSample;

/// Channel capacity for delivered heading samples
const SAMPLE_CHANNEL_SIZE: usize = 8;

/// Heading samples that passed the delivery filter
pub static SAMPLE_CHANNEL: Channel<CriticalSectionRawMutex, HeadingSample, SAMPLE_CHANNEL_SIZE> =
    Channel::new();

/// Latest display text block; the TX task drains it to the terminal
pub static SCREEN_TEXT: Signal<CriticalSectionRawMutex, DisplayText> = Signal::new();
