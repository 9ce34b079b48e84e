#![forbid(unsafe_code)]

//! Shared vocabulary for the kinema playback engine.
//!
//! Leaf crate: every other kinema crate speaks in these types, so events,
//! recovery decisions and the controller never need to depend on each other
//! just to name an error kind or a quality level.

mod error_kind;
mod fault;
mod level;
mod mode;
mod time;

pub use error_kind::ErrorKind;
pub use fault::{Fault, FaultClass};
pub use level::{LevelSelection, QualityLevel};
pub use mode::{EngineKind, MediaFormat, TransportMode};
pub use time::clamp_position;
