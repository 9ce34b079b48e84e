use std::fmt;

use serde::{Deserialize, Serialize};

/// Error kinds surfaced to the hosting UI.
///
/// `Network` and `Decode` are transient and normally handled in place.
/// `Timeout` is derived locally from elapsed loading time and is only ever a
/// hint. `Source` and `Unknown` are terminal for the current attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Network,
    Decode,
    Source,
    Timeout,
    Unknown,
}

impl ErrorKind {
    /// Fixed human-readable message for this kind.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Network => "Network error. Check your connection and try again.",
            Self::Decode => "The video could not be decoded.",
            Self::Source => "This video source is unavailable or not supported.",
            Self::Timeout => "Loading is taking longer than usual.",
            Self::Unknown => "Playback failed.",
        }
    }

    /// Whether the kind is recovered in place without tearing the engine down.
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Network | Self::Decode | Self::Timeout)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Network => "network",
            Self::Decode => "decode",
            Self::Source => "source",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
