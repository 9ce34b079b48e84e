use kinema_core::{EngineKind, ErrorKind, LevelSelection, QualityLevel};
use serde::Serialize;

/// How long a load has been running without progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadingStage {
    /// First threshold crossed (5 s by default).
    Slow,
    /// Second threshold crossed (15 s by default).
    VerySlow,
}

impl LoadingStage {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Slow => ErrorKind::Timeout.message(),
            Self::VerySlow => "Still loading. The connection may be slow, or try another source.",
        }
    }
}

/// Session-level events for the hosting UI.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PlayerEvent {
    /// Engine is ready and the resume position has been applied.
    Ready {
        engine: EngineKind,
        duration: Option<f64>,
    },
    /// Playback position moved. Hosts persist progress from this.
    TimeUpdate { current: f64, duration: Option<f64> },
    /// Playback reached the end.
    Ended,
    /// Session entered the failed state.
    Error {
        kind: ErrorKind,
        message: String,
        retries_left: u32,
    },
    /// Transient failure being recovered in place.
    Recovering { kind: ErrorKind },
    /// Loading is taking long; informational only.
    LoadingHint { stage: LoadingStage, message: String },
    /// User asked to resolve a failure by picking another source.
    SourceSwitchRequested,
    /// Play/pause state changed.
    PlayStateChanged { playing: bool },
    /// Playback rate changed. `temporary` marks long-press boosts.
    RateChanged { rate: f64, temporary: bool },
    /// Volume changed.
    VolumeChanged { volume: f64 },
    /// Quality levels became available or the selection changed.
    QualityLevels {
        levels: Vec<QualityLevel>,
        selected: LevelSelection,
    },
    /// Source is an embed page; the host renders it in a frame.
    Iframe { url: String },
    /// Fullscreen state changed.
    FullscreenChanged { fullscreen: bool },
}
