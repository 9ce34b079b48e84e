#![forbid(unsafe_code)]

//! Unified event bus for the kinema playback engine.
//!
//! The controller is the only publisher; hosting UIs subscribe and render.

mod bus;
mod engine;
mod event;
mod overlay;
mod player;

pub use bus::EventBus;
pub use engine::EngineEvent;
pub use event::Event;
pub use overlay::OverlayEvent;
pub use player::{LoadingStage, PlayerEvent};
