#![forbid(unsafe_code)]

//! Source resolution.
//!
//! Decides, from a raw media reference and an optional playback token,
//! which physical URL and transport the player uses. Resolution is pure:
//! the same inputs always give the same [`ResolvedSource`], and nothing here
//! performs I/O.

mod config;
mod error;
mod format;
mod resolver;

pub use config::ProxyEndpoints;
pub use error::{SourceError, SourceResult};
pub use format::classify;
pub use resolver::{ResolvedSource, SourceResolver};
