#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc)]

//! Playback controller.
//!
//! [`Controller`] composes the source resolver, streaming engine, recovery
//! machine, gesture interpreter, preference store and screen managers into
//! one player, and publishes everything observable on an
//! [`EventBus`](kinema_events::EventBus).

mod config;
mod controller;
mod error;
mod session;


pub use config::{FeatureFlags, PlayerConfig, PlayerOptions};
pub use controller::{Collaborators, Controller};
pub use error::{PlayError, PlayResult};
pub use session::{PlaybackSession, SourceRequest};
