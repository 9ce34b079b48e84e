use thiserror::Error;

/// Failures of surface operations that return a result.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// The platform refused to start playback without a user gesture.
    #[error("autoplay blocked: {0}")]
    AutoplayBlocked(String),

    #[error("surface detached")]
    Detached,

    #[error("{0}")]
    Other(String),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;
