use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PrefsError {
    /// The host store refused the operation (quota, private mode, ...).
    #[error("store unavailable: {0}")]
    Store(String),

    #[error("failed to encode preferences: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for PrefsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

pub type PrefsResult<T> = Result<T, PrefsError>;
