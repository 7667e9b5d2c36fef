//! OAuth2 client-credentials flow against the Cisco SSO token endpoint.

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;

use super::AccessToken;
use crate::config::DEFAULT_TOKEN_URL;
use crate::error::AuthError;

/// OAuth2 client-credentials grant for the Cisco Support APIs.
///
/// Exchanges an API client ID and secret for an access token at the Cisco
/// SSO endpoint. No retry is attempted on failure; the error is surfaced
/// directly to the caller.
///
/// # Example
///
/// ```ignore
/// use cisco_eox::auth::ClientCredentialsFlow;
///
/// let flow = ClientCredentialsFlow::new("my-client-key", "my-client-secret");
/// let token = flow.authenticate().await?;
/// println!("Authorization: {}", token.as_header());
/// ```
#[derive(Clone)]
pub struct ClientCredentialsFlow {
    client_id: String,
    client_secret: String,
    token_url: String,
    http_client: reqwest::Client,
}

impl ClientCredentialsFlow {
    /// Creates a new flow with the given API credentials.
    ///
    /// Uses the standard Cisco SSO token endpoint. No network call is made
    /// until [`authenticate`](Self::authenticate).
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Overrides the token endpoint URL.
    ///
    /// Intended for tests against a mock server.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Overrides the HTTP client used for the exchange.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    /// Performs the client-credentials exchange and returns a new token.
    ///
    /// A non-2xx response fails with [`AuthError::Http`] carrying the
    /// status and raw body; network failures surface as
    /// [`AuthError::Transport`].
    pub async fn authenticate(&self) -> Result<AccessToken, AuthError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        tracing::debug!(endpoint = %self.token_url, "requesting access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.text().await?;
            let token_response: TokenResponse = serde_json::from_str(&body)
                .map_err(|e| AuthError::Parse(format!("invalid token response: {}", e)))?;
            Ok(token_response.into_access_token())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(AuthError::Http { status, body })
        }
    }
}

// Manual Debug so the secret never reaches logs.
impl std::fmt::Debug for ClientCredentialsFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentialsFlow")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("token_url", &self.token_url)
            .finish()
    }
}

/// Token response from the SSO endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
    #[serde(default, deserialize_with = "deserialize_expires_in")]
    expires_in: Option<u64>,
}

/// Deserializes `expires_in` which can be either a number or a string.
fn deserialize_expires_in<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::Number(n)) => Ok(Some(n)),
        Some(StringOrNumber::String(s)) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid expires_in value: {}", s))),
    }
}

impl TokenResponse {
    fn into_access_token(self) -> AccessToken {
        match self.expires_in {
            Some(secs) => AccessToken::with_expiry(
                self.token_type,
                self.access_token,
                Utc::now() + Duration::seconds(secs as i64),
            ),
            None => AccessToken::new(self.token_type, self.access_token),
        }
    }
}
