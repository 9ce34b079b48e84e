use kinema_core::MediaFormat;
use url::Url;

const HLS_EXTENSIONS: &[&str] = &["m3u8"];
const PROGRESSIVE_EXTENSIONS: &[&str] = &["mp4", "m4v", "webm", "mov", "ogv", "ogg", "mkv"];

/// Classify a source URL by the extension of its last path segment.
///
/// Anything that is neither an HLS manifest nor a known progressive
/// container is treated as an embed page.
#[must_use]
pub fn classify(url: &Url) -> MediaFormat {
    let Some(ext) = extension(url) else {
        return MediaFormat::Embed;
    };
    if HLS_EXTENSIONS.contains(&ext.as_str()) {
        MediaFormat::Hls
    } else if PROGRESSIVE_EXTENSIONS.contains(&ext.as_str()) {
        MediaFormat::Progressive
    } else {
        MediaFormat::Embed
    }
}

fn extension(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    let (_, ext) = last.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}
