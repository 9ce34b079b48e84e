use kinema_core::{FaultClass, QualityLevel};

/// Error class reported by the segment client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientErrorClass {
    Network,
    Media,
    Mux,
    KeySystem,
    Other,
}

impl From<ClientErrorClass> for FaultClass {
    fn from(class: ClientErrorClass) -> Self {
        match class {
            ClientErrorClass::Network => Self::Network,
            ClientErrorClass::Media | ClientErrorClass::Mux => Self::Media,
            ClientErrorClass::KeySystem | ClientErrorClass::Other => Self::Other,
        }
    }
}

/// `MediaError.code` of the media element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceErrorCode {
    Aborted,
    Network,
    Decode,
    SrcNotSupported,
    Unknown,
}

impl SurfaceErrorCode {
    /// Map the numeric `MediaError.code` (1..=4).
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Aborted,
            2 => Self::Network,
            3 => Self::Decode,
            4 => Self::SrcNotSupported,
            _ => Self::Unknown,
        }
    }

    /// `None` for aborts, which are user-initiated and not failures.
    #[must_use]
    pub fn fault_class(self) -> Option<FaultClass> {
        match self {
            Self::Aborted => None,
            Self::Network => Some(FaultClass::Network),
            Self::Decode => Some(FaultClass::Media),
            Self::SrcNotSupported => Some(FaultClass::Unsupported),
            Self::Unknown => Some(FaultClass::Other),
        }
    }
}

/// Callback from the host for one attachment.
#[derive(Clone, Debug, PartialEq)]
pub enum MediaSignal {
    /// Segment client parsed the manifest.
    ManifestParsed { levels: Vec<QualityLevel> },
    /// Media element knows duration and dimensions.
    LoadedMetadata,
    TimeUpdate,
    /// Buffered ranges changed.
    Progress,
    Playing,
    Paused,
    /// Playback stalled waiting for data.
    Waiting,
    Ended,
    LevelSwitched { level: usize },
    ClientError {
        class: ClientErrorClass,
        fatal: bool,
        detail: String,
    },
    SurfaceError {
        code: SurfaceErrorCode,
        detail: String,
    },
}
