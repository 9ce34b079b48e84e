//! Playback capabilities of the hosting platform.

use derive_setters::Setters;
use url::Url;

const MOBILE_MARKERS: &[&str] = &["android", "iphone", "ipad", "ipod", "mobile"];
const IOS_MARKERS: &[&str] = &["iphone", "ipad", "ipod"];
/// Browsers that mention "Safari" in their UA without being Safari.
const NOT_SAFARI_MARKERS: &[&str] = &["chrome", "chromium", "crios", "fxios", "edg", "android"];

/// Capabilities that steer source resolution and engine selection.
#[derive(Clone, Debug, PartialEq, Eq, Setters)]
#[setters(prefix = "with_")]
pub struct PlatformCaps {
    /// Phone or tablet client (smaller buffers, proxy for CORS rewriting).
    pub mobile: bool,
    /// The surface can decode HLS itself and the platform prefers it (Safari, iOS).
    pub prefers_native_hls: bool,
    /// MediaSource is available, so a segment-fetching client can run.
    pub media_source: bool,
    /// URL of the hosting page; relative sources resolve against it.
    pub page_url: Url,
}

impl PlatformCaps {
    /// Desktop defaults: MediaSource available, no native HLS preference.
    #[must_use]
    pub fn desktop(page_url: Url) -> Self {
        Self {
            mobile: false,
            prefers_native_hls: false,
            media_source: true,
            page_url,
        }
    }

    /// Derive capabilities from a user-agent string.
    ///
    /// `native_hls_playable` is the surface's own answer to "can you play
    /// `application/vnd.apple.mpegurl`"; native HLS is preferred only when the
    /// surface can play it *and* the browser is Safari or runs on iOS.
    #[must_use]
    pub fn from_user_agent(
        user_agent: &str,
        page_url: Url,
        native_hls_playable: bool,
        media_source: bool,
    ) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        let mobile = MOBILE_MARKERS.iter().any(|m| ua.contains(m));
        let ios = IOS_MARKERS.iter().any(|m| ua.contains(m));
        let safari = ua.contains("safari") && !NOT_SAFARI_MARKERS.iter().any(|m| ua.contains(m));
        let prefers_native_hls = native_hls_playable && (ios || safari);
        tracing::debug!(mobile, ios, safari, prefers_native_hls, media_source, "platform caps");
        Self {
            mobile,
            prefers_native_hls,
            media_source,
            page_url,
        }
    }

    /// Page served over a secure scheme.
    #[must_use]
    pub fn page_is_secure(&self) -> bool {
        self.page_url.scheme() == "https"
    }
}
