//! Key handling result shared by widgets.

/// Whether a widget used a key event.
///
/// The app offers each key to the focused widget first and falls back to
/// its own bindings only on `NotConsumed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Consumed,
    NotConsumed,
}

impl EventStatus {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}
