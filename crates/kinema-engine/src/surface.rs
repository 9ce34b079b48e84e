use kinema_platform::MaybeSend;
use url::Url;

use crate::error::SurfaceResult;

/// The media element the engine drives.
///
/// Only the engine writes to the surface; the controller reaches it through
/// engine methods.
pub trait MediaSurface: MaybeSend + 'static {
    /// Point the element at `url` (native HLS or progressive).
    fn set_src(&mut self, url: &Url);

    /// Remove the source and release decoder resources.
    fn clear_src(&mut self);

    /// Start playback. May be rejected without a user gesture.
    fn play(&mut self) -> SurfaceResult<()>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn seek(&mut self, position: f64);

    fn current_time(&self) -> f64;

    /// `None` until metadata is known; infinite for live streams.
    fn duration(&self) -> Option<f64>;

    /// End of the buffered range containing the playhead.
    fn buffered_end(&self) -> Option<f64>;

    fn set_rate(&mut self, rate: f64);

    fn set_volume(&mut self, volume: f64);
}
