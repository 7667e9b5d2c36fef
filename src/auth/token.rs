//! TokenProvider trait and AccessToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::AuthError;

/// An OAuth2 access token with its type and optional expiration.
///
/// This is the result of a successful client-credentials exchange. The
/// Cisco APIs expect the `Authorization` header to carry the token type
/// reported by the SSO endpoint (normally `Bearer`), so the type is kept
/// alongside the token itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The token type reported by the endpoint (e.g. `Bearer`).
    pub token_type: String,
    /// The access token used for API authentication.
    pub access_token: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a new access token without expiry information.
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Creates a new access token with expiration time.
    pub fn with_expiry(
        token_type: impl Into<String>,
        access_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns `true` if the token is still usable.
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }

    /// Returns the token as an `Authorization` header value,
    /// e.g. `Bearer 0123456789abcdef`.
    pub fn as_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Trait for providing access tokens to the EoX client.
///
/// Implementors are responsible for obtaining tokens, caching them, and
/// replacing them when they expire. The client calls `get_token` before
/// every request, so an implementation that checks expiry (such as
/// [`AuthSession`](crate::auth::AuthSession)) keeps long multi-batch
/// queries from running into an expired token mid-run.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets a currently-valid access token.
    ///
    /// Implementations should return a cached token while it is valid and
    /// re-authenticate once it is not.
    async fn get_token(&self) -> Result<AccessToken, AuthError>;
}

/// A token provider that always returns the same static token.
///
/// Useful for testing or when a token has been acquired out of band.
/// No expiry handling is performed.
///
/// # Example
///
/// ```
/// use cisco_eox::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("Bearer", "my-access-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a new static token provider from a token type and value.
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token_type, access_token),
        }
    }

    /// Creates a new static token provider from an existing token.
    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        Ok(self.token.clone())
    }
}
