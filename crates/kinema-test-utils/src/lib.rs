#![forbid(unsafe_code)]
#![expect(
    clippy::unwrap_used,
    reason = "unwraps are fine in test fixtures"
)]

//! Shared test utilities for the kinema workspace.
//!
//! Every fake keeps its state behind an `Arc<Mutex<..>>`, so a test can hand
//! one clone to the controller and inspect another.

pub mod client;
pub mod rng;
pub mod screen;
pub mod surface;

pub use client::{ClientLog, FakeClient, FakeClientFactory};
pub use rng::Xorshift64;
pub use screen::{FakeScreen, ScreenState};
pub use surface::{FakeSurface, SurfaceState};
use url::Url;

/// Page URL used by fixtures.
#[must_use]
pub fn page_url(secure: bool) -> Url {
    let scheme = if secure { "https" } else { "http" };
    Url::parse(&format!("{scheme}://player.example/watch")).unwrap()
}

/// Install a `RUST_LOG`-driven subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
