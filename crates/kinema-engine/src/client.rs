use kinema_core::LevelSelection;
use kinema_platform::MaybeSend;
use url::Url;

use crate::{engine::AttachmentId, tuning::ClientTuning};

/// A segment-fetching HLS client bound to the surface's media element.
pub trait SegmentClient: MaybeSend + 'static {
    /// Attach to the media element and start loading `url`.
    fn load_source(&mut self, url: &Url);

    /// Resume manifest/segment loading after a network failure.
    fn start_load(&mut self);

    /// Re-initialize the decode pipeline after a media failure.
    fn recover_media_error(&mut self);

    /// Pin a rendition or return to automatic selection.
    fn set_level(&mut self, selection: LevelSelection);

    /// Release all network and media resources. Must be synchronous.
    fn destroy(&mut self);
}

/// Builds segment clients. Implemented by the host, which knows the media
/// element the surface wraps.
pub trait SegmentClientFactory: MaybeSend + 'static {
    type Client: SegmentClient;

    /// Whether the platform can run a segment client (MediaSource present).
    fn is_supported(&self) -> bool;

    /// Create a client whose callbacks are tagged with `attachment`.
    fn create(&mut self, attachment: AttachmentId, tuning: &ClientTuning) -> Self::Client;
}
