use serde::{Deserialize, Serialize};

use crate::{EngineKind, ErrorKind};

/// Coarse class of an engine failure, before any recovery decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FaultClass {
    /// Manifest or segment transfer failed.
    Network,
    /// Decode pipeline or demuxer failed.
    Media,
    /// Source format or codec unsupported, or no backend can play it.
    Unsupported,
    /// Anything else.
    Other,
}

/// A failure reported by the engine for one attachment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub class: FaultClass,
    pub engine: EngineKind,
    pub fatal: bool,
    pub detail: String,
}

impl Fault {
    #[must_use]
    pub fn fatal(class: FaultClass, engine: EngineKind, detail: impl Into<String>) -> Self {
        Self {
            class,
            engine,
            fatal: true,
            detail: detail.into(),
        }
    }

    /// Caller-facing kind for this fault.
    #[must_use]
    pub fn error_kind(&self) -> ErrorKind {
        match self.class {
            FaultClass::Network => ErrorKind::Network,
            FaultClass::Media => ErrorKind::Decode,
            FaultClass::Unsupported => ErrorKind::Source,
            FaultClass::Other => ErrorKind::Unknown,
        }
    }
}
