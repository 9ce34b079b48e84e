use std::fmt;

use serde::{Deserialize, Serialize};

/// How the resolved source reaches the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransportMode {
    /// Third-party embed page rendered in an isolated frame.
    Iframe,
    /// Signed manifest proxy that re-validates the token per request.
    TokenProxy,
    /// Generic rewriting proxy (mixed content, mobile CORS).
    RewriteProxy,
    /// Source used unchanged.
    Direct,
}

/// Media container family of a source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaFormat {
    /// Segmented stream driven by an `.m3u8` manifest.
    Hls,
    /// Single-file media the surface can play on its own.
    Progressive,
    /// Not media at all: an embed page.
    Embed,
}

/// Engine backend chosen once per attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineKind {
    /// Platform-native HLS through the surface `src`.
    Native,
    /// Segment-fetching client feeding the surface through MediaSource.
    SegmentClient,
    /// Progressive file on the surface `src`.
    Progressive,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Native => "native",
            Self::SegmentClient => "segment-client",
            Self::Progressive => "progressive",
        };
        f.write_str(name)
    }
}
