//! Segment-client configuration object handed to the host's `createClient`.

use std::time::Duration;

use kinema_engine::ClientTuning;
use serde_json::{Value, json};

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Client configuration in the shape hls.js expects.
#[must_use]
pub fn client_config(tuning: &ClientTuning) -> Value {
    let delay = millis(tuning.retry_delay);
    let max_delay = millis(tuning.max_retry_delay);
    json!({
        "maxBufferLength": tuning.max_buffer_secs,
        "maxMaxBufferLength": tuning.max_max_buffer_secs,
        "backBufferLength": tuning.back_buffer_secs,
        "manifestLoadingMaxRetry": tuning.manifest_retries,
        "levelLoadingMaxRetry": tuning.manifest_retries,
        "fragLoadingMaxRetry": tuning.fragment_retries,
        "manifestLoadingRetryDelay": delay,
        "levelLoadingRetryDelay": delay,
        "fragLoadingRetryDelay": delay,
        "manifestLoadingMaxRetryTimeout": max_delay,
        "levelLoadingMaxRetryTimeout": max_delay,
        "fragLoadingMaxRetryTimeout": max_delay,
        "startLevel": if tuning.start_lowest { 0 } else { -1 },
        "enableWorker": true,
    })
}
