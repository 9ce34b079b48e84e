use kinema_core::{EngineKind, ErrorKind};
use serde::Serialize;

/// Engine attachment lifecycle, mostly useful for diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EngineEvent {
    /// A new attachment was bound to the surface.
    Attached {
        attachment: u64,
        kind: EngineKind,
        attempt: u32,
        url: String,
    },
    /// The attachment was torn down.
    Destroyed { attachment: u64 },
    /// Fault reported by the engine, before recovery classification.
    Fault {
        kind: ErrorKind,
        fatal: bool,
        detail: String,
    },
    /// Segment client switched rendition.
    LevelSwitched { level: usize },
    /// End of the last contiguous buffered range.
    Buffered { end: f64 },
}
