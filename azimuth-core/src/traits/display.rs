//! Display surface trait

/// Text sink for the compass display
///
/// The surface copies the text it is handed and renders it when it can.
/// Writes are assumed to succeed; rendering failures belong to the
/// display layer and are never surfaced to the compass logic.
pub trait DisplaySurface {
    /// Replace the displayed text
    fn set_text(&mut self, text: &str);
}
