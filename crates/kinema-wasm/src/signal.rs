//! Translation of DOM media events and segment-client events into
//! [`MediaSignal`]s. Event details arrive as JSON.

use kinema_core::QualityLevel;
use kinema_engine::{ClientErrorClass, MediaSignal, SurfaceErrorCode};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct Rendition {
    height: Option<u32>,
    #[serde(default)]
    bitrate: u64,
}

/// Labels for the renditions of a parsed manifest, in client order.
#[must_use]
pub fn parse_levels(levels: &Value) -> Vec<QualityLevel> {
    let Ok(renditions) = Vec::<Rendition>::deserialize(levels) else {
        return Vec::new();
    };
    renditions
        .into_iter()
        .enumerate()
        .map(|(idx, r)| QualityLevel::from_rendition(idx, r.height, r.bitrate))
        .collect()
}

fn client_class(name: &str) -> ClientErrorClass {
    match name {
        "networkError" => ClientErrorClass::Network,
        "mediaError" => ClientErrorClass::Media,
        "muxError" => ClientErrorClass::Mux,
        "keySystemError" => ClientErrorClass::KeySystem,
        _ => ClientErrorClass::Other,
    }
}

fn text(detail: &Value, key: &str) -> String {
    detail
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// `None` for events the engine does not care about.
#[must_use]
pub fn parse_media_event(name: &str, detail: &Value) -> Option<MediaSignal> {
    let signal = match name {
        "loadedmetadata" => MediaSignal::LoadedMetadata,
        "timeupdate" => MediaSignal::TimeUpdate,
        "progress" => MediaSignal::Progress,
        "playing" => MediaSignal::Playing,
        "pause" => MediaSignal::Paused,
        "waiting" => MediaSignal::Waiting,
        "ended" => MediaSignal::Ended,
        "error" => {
            let code = detail
                .get("code")
                .and_then(Value::as_u64)
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or_default();
            MediaSignal::SurfaceError {
                code: SurfaceErrorCode::from_code(code),
                detail: text(detail, "message"),
            }
        }
        "manifestParsed" => MediaSignal::ManifestParsed {
            levels: detail.get("levels").map(parse_levels).unwrap_or_default(),
        },
        "levelSwitched" => MediaSignal::LevelSwitched {
            level: detail
                .get("level")
                .and_then(Value::as_u64)
                .and_then(|l| usize::try_from(l).ok())?,
        },
        "clientError" => MediaSignal::ClientError {
            class: client_class(&text(detail, "type")),
            fatal: detail.get("fatal").and_then(Value::as_bool).unwrap_or(false),
            detail: text(detail, "details"),
        },
        _ => return None,
    };
    Some(signal)
}
