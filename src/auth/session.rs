//! Token-caching session with re-authentication on expiry.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AccessToken;
use super::ClientCredentialsFlow;
use super::TokenProvider;
use crate::error::AuthError;

/// A login session that caches its token and re-authenticates on demand.
///
/// Construction performs an immediate login; a failed exchange fails the
/// constructor and stores no token. Afterwards the session hands out the
/// cached token while it is valid and replaces it wholesale once it is
/// not. [`ensure_valid_token`](Self::ensure_valid_token) is the only
/// re-authentication trigger; there is no background refresh.
///
/// `AuthSession` implements [`TokenProvider`], so handing it to an
/// [`EoxClient`](crate::EoxClient) means expiry is checked before every
/// request of a long-running multi-batch query.
///
/// # Example
///
/// ```ignore
/// use cisco_eox::auth::{AuthSession, ClientCredentialsFlow};
///
/// let flow = ClientCredentialsFlow::new("my-client-key", "my-client-secret");
/// let session = AuthSession::login(flow).await?;
/// assert!(session.is_token_valid().await);
/// ```
#[derive(Debug)]
pub struct AuthSession {
    flow: ClientCredentialsFlow,
    token: RwLock<Option<AccessToken>>,
}

impl AuthSession {
    /// Logs in with the given flow and returns the session.
    ///
    /// Fails with [`AuthError`] if the exchange fails; no token is stored
    /// in that case.
    pub async fn login(flow: ClientCredentialsFlow) -> Result<Self, AuthError> {
        let token = flow.authenticate().await?;
        Ok(Self {
            flow,
            token: RwLock::new(Some(token)),
        })
    }

    /// Re-authenticates unconditionally, replacing any stored token.
    pub async fn relogin(&self) -> Result<AccessToken, AuthError> {
        let token = self.flow.authenticate().await?;
        let mut guard = self.token.write().await;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Returns `true` if the stored token is still valid.
    ///
    /// Pure check against the current time; no side effect.
    pub async fn is_token_valid(&self) -> bool {
        let guard = self.token.read().await;
        guard.as_ref().is_some_and(AccessToken::is_valid)
    }

    /// Returns a valid token, re-authenticating first if the stored one
    /// has expired.
    pub async fn ensure_valid_token(&self) -> Result<AccessToken, AuthError> {
        // Fast path: cached token still valid.
        {
            let guard = self.token.read().await;
            if let Some(token) = &*guard {
                if token.is_valid() {
                    return Ok(token.clone());
                }
            }
        }

        // Slow path: re-authenticate under the write lock.
        let mut guard = self.token.write().await;

        // Double-check after acquiring the write lock (another task may
        // have re-authenticated in the meantime).
        if let Some(token) = &*guard {
            if token.is_valid() {
                return Ok(token.clone());
            }
        }

        tracing::debug!("stored token expired, re-authenticating");
        let token = self.flow.authenticate().await?;
        *guard = Some(token.clone());
        Ok(token)
    }
}

#[async_trait]
impl TokenProvider for AuthSession {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        self.ensure_valid_token().await
    }
}
