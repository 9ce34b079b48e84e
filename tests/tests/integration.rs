//! Scenario tests for kinema, driven through fake hosts.
#![expect(
    clippy::unwrap_used,
    reason = "integration tests unwrap freely"
)]

mod common;
mod kinema_gesture;
mod kinema_play;
