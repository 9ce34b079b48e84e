use serde::Serialize;

use crate::{EngineEvent, OverlayEvent, PlayerEvent};

/// Every event a player publishes, grouped by origin.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "source", content = "event", rename_all = "camelCase")]
pub enum Event {
    /// Session-level events the hosting UI reacts to.
    Player(PlayerEvent),
    /// Engine attachment lifecycle.
    Engine(EngineEvent),
    /// Short-lived gesture feedback.
    Overlay(OverlayEvent),
}

impl From<PlayerEvent> for Event {
    fn from(e: PlayerEvent) -> Self {
        Self::Player(e)
    }
}

impl From<EngineEvent> for Event {
    fn from(e: EngineEvent) -> Self {
        Self::Engine(e)
    }
}

impl From<OverlayEvent> for Event {
    fn from(e: OverlayEvent) -> Self {
        Self::Overlay(e)
    }
}
