#![forbid(unsafe_code)]

//! Player preferences.
//!
//! Volume and playback rate survive reloads through a host
//! [`KeyValueStore`] (browser `localStorage` in the wasm front). Values are
//! read once per session and written on every deliberate change.

mod error;
mod prefs;
mod store;

pub use error::{PrefsError, PrefsResult};
pub use prefs::{PlayerPreferences, PreferenceStore, RATE_RANGE};
pub use store::{KeyValueStore, MemoryStore};
#[cfg(any(test, feature = "test-utils"))]
pub use store::KeyValueStoreMock;
