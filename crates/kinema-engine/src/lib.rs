#![forbid(unsafe_code)]

//! Streaming engine.
//!
//! [`StreamingEngine`] owns the media surface and at most one live
//! attachment. An attachment is one attempt at playing a resolved URL with
//! one backend ([`EngineKind`](kinema_core::EngineKind)), chosen once when the
//! attachment is created:
//!
//! - attempt 0 on platforms that prefer it: native HLS via the surface `src`;
//! - otherwise: a segment-fetching client built by the host's
//!   [`SegmentClientFactory`] with platform-aware [`ClientTuning`];
//! - progressive files: the surface `src`, no client.
//!
//! Host callbacks come back as [`MediaSignal`]s tagged with the
//! [`AttachmentId`] they were issued for. Signals for a retired attachment
//! are dropped, so a late callback from a destroyed client can never touch
//! the next attempt.

mod client;
mod engine;
mod error;
mod signal;
mod surface;
mod tuning;

pub use client::{SegmentClient, SegmentClientFactory};
pub use engine::{AttachOptions, AttachmentId, EngineOutput, StreamingEngine, select_kind};
pub use error::{SurfaceError, SurfaceResult};
pub use signal::{ClientErrorClass, MediaSignal, SurfaceErrorCode};
pub use surface::MediaSurface;
pub use tuning::ClientTuning;
