#![forbid(unsafe_code)]

//! # Kinema
//!
//! Facade crate for the kinema adaptive video playback engine.
//!
//! ## Quick start
//!
//! ```ignore
//! use kinema::prelude::*;
//!
//! let mut player = Controller::new(
//!     PlayerConfig::default(),
//!     Collaborators { surface, clients, store, screen, caps },
//! );
//! let mut events = player.subscribe();
//! player.switch_source(SourceRequest::new("https://cdn.example/v/index.m3u8"), Instant::now())?;
//!
//! // From the host's callbacks:
//! player.handle_media(id, MediaSignal::ManifestParsed { levels }, Instant::now());
//! player.handle_pointer(PointerEvent::Start(Point::new(x, y)), Instant::now());
//! if let Some(at) = player.next_deadline() { /* schedule player.tick(at) */ }
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod types {
    pub use kinema_core::*;
}

pub mod engine {
    pub use kinema_engine::*;
}

pub mod events {
    pub use kinema_events::*;
}

pub mod gesture {
    pub use kinema_gesture::*;
}

pub mod platform {
    pub use kinema_platform::*;
}

pub mod play {
    pub use kinema_play::*;
}

pub mod prefs {
    pub use kinema_prefs::*;
}

pub mod recovery {
    pub use kinema_recovery::*;
}

pub mod screen {
    pub use kinema_screen::*;
}

pub mod source {
    pub use kinema_source::*;
}

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use kinema_core::{EngineKind, ErrorKind, LevelSelection, QualityLevel, TransportMode};
    pub use kinema_engine::{
        AttachmentId, MediaSignal, MediaSurface, SegmentClient, SegmentClientFactory,
    };
    pub use kinema_events::{Event, EventBus, LoadingStage, OverlayEvent, PlayerEvent};
    pub use kinema_gesture::{Point, PointerEvent};
    pub use kinema_platform::{Instant, PlatformCaps};
    pub use kinema_play::{
        Collaborators, Controller, FeatureFlags, PlayError, PlaybackSession, PlayerConfig,
        PlayerOptions, SourceRequest,
    };
    pub use kinema_prefs::{KeyValueStore, MemoryStore};
    pub use kinema_screen::ScreenApi;
    pub use kinema_source::ProxyEndpoints;
}
