use std::time::Duration;

use derivative::Derivative;
use derive_setters::Setters;
use serde::Deserialize;

/// Retry budget and loading-hint thresholds.
#[derive(Clone, Debug, Derivative, Deserialize, PartialEq, Setters)]
#[derivative(Default)]
#[serde(default, rename_all = "camelCase")]
#[setters(prefix = "with_")]
pub struct RecoveryConfig {
    /// Full engine rebuilds allowed before the session is terminal.
    #[derivative(Default(value = "3"))]
    pub max_retries: u32,
    /// Consecutive in-place recoveries allowed without a successful resume.
    #[derivative(Default(value = "3"))]
    pub max_in_place: u32,
    #[derivative(Default(value = "Duration::from_secs(5)"))]
    #[serde(skip)]
    pub slow_after: Duration,
    #[derivative(Default(value = "Duration::from_secs(15)"))]
    #[serde(skip)]
    pub very_slow_after: Duration,
}
