use derivative::Derivative;
use derive_setters::Setters;
use kinema_engine::ClientTuning;
use kinema_gesture::GestureConfig;
use kinema_recovery::RecoveryConfig;
use kinema_source::ProxyEndpoints;
use serde::Deserialize;

/// Optional behaviors. The simple player turns all of them off.
#[derive(Clone, Copy, Debug, Derivative, PartialEq, Eq, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct FeatureFlags {
    /// Interpret pointer events as gestures.
    #[derivative(Default(value = "true"))]
    pub gestures: bool,
    /// Keep the screen awake while playing.
    #[derivative(Default(value = "true"))]
    pub wake_lock: bool,
    /// Long-press speeds playback up.
    #[derivative(Default(value = "true"))]
    pub long_press_speed: bool,
}

impl FeatureFlags {
    /// Plain player: no gestures, no wake lock.
    #[must_use]
    pub fn simple() -> Self {
        Self {
            gestures: false,
            wake_lock: false,
            long_press_speed: false,
        }
    }
}

/// Configuration for the controller.
#[derive(Clone, Debug, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_", strip_option)]
pub struct PlayerConfig {
    pub endpoints: ProxyEndpoints,
    pub features: FeatureFlags,
    pub gestures: GestureConfig,
    pub recovery: RecoveryConfig,
    /// Segment client tuning. When `None`, derived from the platform.
    pub tuning: Option<ClientTuning>,
    /// Start playback as soon as the engine is ready.
    #[derivative(Default(value = "true"))]
    pub autoplay: bool,
    /// Event bus capacity.
    #[derivative(Default(value = "64"))]
    pub event_capacity: usize,
    /// Storage key of the persisted preferences.
    pub preferences_key: Option<String>,
}

/// Host-facing options, accepted as JSON by the browser front.
#[derive(Clone, Debug, Derivative, Deserialize)]
#[derivative(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerOptions {
    pub proxy: ProxyEndpoints,
    #[derivative(Default(value = "true"))]
    pub gestures: bool,
    #[derivative(Default(value = "true"))]
    pub wake_lock: bool,
    #[derivative(Default(value = "true"))]
    pub long_press_speed: bool,
    #[derivative(Default(value = "true"))]
    pub autoplay: bool,
    pub max_retries: Option<u32>,
}

impl From<PlayerOptions> for PlayerConfig {
    fn from(options: PlayerOptions) -> Self {
        let mut recovery = RecoveryConfig::default();
        if let Some(max_retries) = options.max_retries {
            recovery.max_retries = max_retries;
        }
        Self::default()
            .with_endpoints(options.proxy)
            .with_features(FeatureFlags {
                gestures: options.gestures,
                wake_lock: options.wake_lock,
                long_press_speed: options.long_press_speed,
            })
            .with_recovery(recovery)
            .with_autoplay(options.autoplay)
    }
}
