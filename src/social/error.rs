//! Domain errors for tune-in operations

use thiserror::Error;

/// Errors raised by [`TuneInManager`](super::TuneInManager).
///
/// Only the first three are produced by the service itself. Store failures
/// pass through untouched in `Store`.
#[derive(Debug, Error)]
pub enum TuneInError {
    /// Self edge or empty identifier. Not retryable.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Removal of an edge that does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// One of the endpoint identities is unknown to the store
    #[error("unknown identity: {0}")]
    UnknownIdentity(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl TuneInError {
    /// True for errors caused by the request rather than the infrastructure
    pub fn is_client_error(&self) -> bool {
        !matches!(self, TuneInError::Store(_))
    }
}

pub type TuneInResult<T> = Result<T, TuneInError>;
