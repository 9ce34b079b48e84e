use kinema_engine::SurfaceError;
use kinema_source::SourceError;

#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum PlayError {
    #[error("player destroyed")]
    Destroyed,

    /// No engine attachment: nothing loaded, failed, or an embed source.
    #[error("no media attached")]
    NotAttached,

    #[error("invalid playback rate {0}")]
    InvalidRate(f64),

    /// The attachment plays through the surface; there are no levels to pick.
    #[error("quality selection needs a segment client")]
    NoSegmentClient,

    #[error("unknown quality level {0}")]
    UnknownLevel(usize),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

pub type PlayResult<T> = Result<T, PlayError>;
