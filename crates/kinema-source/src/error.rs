use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("source is empty")]
    Empty,

    #[error("invalid source URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("invalid proxy endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

pub type SourceResult<T> = Result<T, SourceError>;
