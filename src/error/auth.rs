//! Authentication error types

/// Errors that can occur during the client-credentials login.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The token endpoint answered with a non-2xx status.
    #[error("token endpoint returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Network error before a response was received.
    #[error("network error during login: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token response could not be parsed.
    #[error("token response parse error: {0}")]
    Parse(String),
}

impl AuthError {
    /// Returns the HTTP status code if the endpoint answered with an error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
