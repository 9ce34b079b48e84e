#![forbid(unsafe_code)]

//! Gesture interpretation.
//!
//! [`GestureInterpreter`] is a pure state machine over pointer events and
//! explicit time. The host feeds it pointer phases and calls
//! [`GestureInterpreter::poll`] when [`GestureInterpreter::next_deadline`]
//! passes; it answers with [`Intent`]s for the controller to apply.

mod config;
mod interpreter;
mod tap;
mod types;

pub use config::GestureConfig;
pub use interpreter::GestureInterpreter;
pub use types::{Axis, Intent, PlaybackSnapshot, Point, PointerEvent, Viewport, Zone};
