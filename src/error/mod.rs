//! Error types

mod api;
mod auth;

pub use api::*;
pub use auth::*;

/// Top-level error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication against the token endpoint failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// An EoX API call failed.
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl Error {
    /// Returns `true` if the underlying failure was network-level
    /// (no HTTP response was received).
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Auth(e) => matches!(e, AuthError::Transport(_)),
            Self::Query(e) => matches!(e, QueryError::Transport(_)),
        }
    }

    /// Returns the HTTP status code if the server answered with an error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth(e) => e.status_code(),
            Self::Query(e) => e.status_code(),
        }
    }
}
