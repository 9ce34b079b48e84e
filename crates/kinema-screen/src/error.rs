use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScreenError {
    #[error("not supported on this platform")]
    Unsupported,

    /// The platform refused, e.g. a hidden page asking for a wake lock.
    #[error("rejected: {0}")]
    Rejected(String),
}

pub type ScreenResult<T> = Result<T, ScreenError>;
