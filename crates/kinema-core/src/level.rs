use serde::{Deserialize, Serialize};

/// One selectable rendition of an adaptive manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityLevel {
    /// Human-readable label, e.g. `720p`.
    pub label: String,
    /// Index as understood by the segment client.
    pub level_index: usize,
}

impl QualityLevel {
    #[must_use]
    pub fn new(label: impl Into<String>, level_index: usize) -> Self {
        Self {
            label: label.into(),
            level_index,
        }
    }

    /// Label derived from a rendition height, falling back to the bitrate.
    #[must_use]
    pub fn from_rendition(level_index: usize, height: Option<u32>, bandwidth_bps: u64) -> Self {
        let label = match height {
            Some(h) if h > 0 => format!("{h}p"),
            _ => format!("{} kbps", bandwidth_bps / 1000),
        };
        Self { label, level_index }
    }
}

/// Quality selection: automatic adaptation or a pinned level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelSelection {
    #[default]
    Auto,
    Index(usize),
}

impl LevelSelection {
    /// Client-side level number (`-1` means automatic).
    #[must_use]
    pub fn as_client_level(self) -> i32 {
        match self {
            Self::Auto => -1,
            Self::Index(idx) => i32::try_from(idx).unwrap_or(i32::MAX),
        }
    }
}
