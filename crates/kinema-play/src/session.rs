use derive_setters::Setters;
use kinema_core::{EngineKind, LevelSelection, QualityLevel, TransportMode};
use kinema_prefs::PlayerPreferences;
use kinema_recovery::ErrorState;
use url::Url;

/// What to play.
#[derive(Clone, Debug, Default, PartialEq, Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct SourceRequest {
    /// Absolute or page-relative media reference.
    pub source: String,
    /// Opaque playback token for the tokenized proxy.
    pub token: Option<String>,
    /// Position to start from, in seconds.
    pub initial_position: f64,
}

impl SourceRequest {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }
}

/// State of the current playback session.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackSession {
    pub source_url: String,
    pub playback_token: Option<String>,
    /// Recomputed on each attempt.
    pub resolved_url: Option<Url>,
    pub transport: Option<TransportMode>,
    pub engine: Option<EngineKind>,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub buffered_end: f64,
    pub quality_levels: Vec<QualityLevel>,
    pub selected_level: LevelSelection,
    /// User-chosen rate; long-press boosts never change it.
    pub playback_rate: f64,
    pub volume: f64,
    pub playing: bool,
    /// Present only while failed.
    pub error_state: Option<ErrorState>,
    pub attempt: u32,
    pub initial_position: f64,
}

impl PlaybackSession {
    pub(crate) fn new(request: &SourceRequest, prefs: PlayerPreferences) -> Self {
        Self {
            source_url: request.source.clone(),
            playback_token: request.token.clone(),
            initial_position: request.initial_position.max(0.0),
            volume: prefs.volume,
            playback_rate: prefs.playback_rate,
            ..Self::empty(prefs)
        }
    }

    pub(crate) fn empty(prefs: PlayerPreferences) -> Self {
        Self {
            source_url: String::new(),
            playback_token: None,
            resolved_url: None,
            transport: None,
            engine: None,
            current_time: 0.0,
            duration: None,
            buffered_end: 0.0,
            quality_levels: Vec::new(),
            selected_level: LevelSelection::Auto,
            playback_rate: prefs.playback_rate,
            volume: prefs.volume,
            playing: false,
            error_state: None,
            attempt: 0,
            initial_position: 0.0,
        }
    }

    /// Where the next attachment resumes from.
    #[must_use]
    pub fn resume_position(&self) -> f64 {
        if self.current_time > 0.0 {
            self.current_time
        } else {
            self.initial_position
        }
    }
}
