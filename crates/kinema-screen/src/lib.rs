#![forbid(unsafe_code)]

//! Screen state: keep the display awake while playing, and enter or leave
//! fullscreen with orientation lock on mobile.
//!
//! Every host call here is best effort. Failures are logged and never
//! propagate into playback.

mod api;
mod error;
mod fullscreen;
mod wake;

#[cfg(any(test, feature = "test-utils"))]
pub use api::ScreenApiMock;
pub use api::ScreenApi;
pub use error::{ScreenError, ScreenResult};
pub use fullscreen::FullscreenManager;
pub use wake::WakeLockManager;
