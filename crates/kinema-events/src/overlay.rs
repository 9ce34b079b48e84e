use serde::Serialize;

/// Gesture feedback. Purely informational, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum OverlayEvent {
    /// Seek target while dragging or after a double-tap.
    Seek { target: f64, delta: f64 },
    /// Volume percentage while dragging.
    Volume { percent: u8 },
    /// Brightness percentage while dragging.
    Brightness { percent: u8 },
    /// Speed indicator during a long-press boost.
    Speed { rate: f64 },
    /// Hide the overlay.
    Cleared,
}
