use std::time::Duration;

use derivative::Derivative;
use derive_setters::Setters;
use kinema_platform::PlatformCaps;

/// Segment-client tuning.
///
/// Desktop keeps a long forward buffer and retries more; mobile bounds
/// memory with a short buffer, gives up sooner and retries faster, since
/// cellular stalls tend to be brief.
#[derive(Clone, Debug, Derivative, PartialEq, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct ClientTuning {
    /// Forward buffer the client aims for, in seconds.
    #[derivative(Default(value = "60.0"))]
    pub max_buffer_secs: f64,
    /// Hard cap on the forward buffer, in seconds.
    #[derivative(Default(value = "120.0"))]
    pub max_max_buffer_secs: f64,
    /// Played media kept behind the playhead, in seconds.
    #[derivative(Default(value = "30.0"))]
    pub back_buffer_secs: f64,
    /// Retries for manifest and level playlist loads.
    #[derivative(Default(value = "4"))]
    pub manifest_retries: u32,
    /// Retries for segment loads.
    #[derivative(Default(value = "6"))]
    pub fragment_retries: u32,
    /// Delay before the first retry; doubles per attempt.
    #[derivative(Default(value = "Duration::from_millis(1000)"))]
    pub retry_delay: Duration,
    /// Upper bound for the retry delay.
    #[derivative(Default(value = "Duration::from_secs(8)"))]
    pub max_retry_delay: Duration,
    /// Start from the lowest rendition instead of estimating bandwidth.
    pub start_lowest: bool,
}

impl ClientTuning {
    /// Desktop profile (the default).
    #[must_use]
    pub fn desktop() -> Self {
        Self::default()
    }

    /// Mobile profile.
    #[must_use]
    pub fn mobile() -> Self {
        Self {
            max_buffer_secs: 30.0,
            max_max_buffer_secs: 60.0,
            back_buffer_secs: 10.0,
            manifest_retries: 2,
            fragment_retries: 3,
            retry_delay: Duration::from_millis(500),
            max_retry_delay: Duration::from_secs(4),
            start_lowest: true,
        }
    }

    #[must_use]
    pub fn for_platform(caps: &PlatformCaps) -> Self {
        if caps.mobile {
            Self::mobile()
        } else {
            Self::desktop()
        }
    }
}
