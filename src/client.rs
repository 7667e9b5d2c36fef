//! Main EoxClient

use std::sync::Arc;

use reqwest::Client;

use crate::auth::TokenProvider;
use crate::config::DEFAULT_BASE_URL;
use crate::config::QueryConfig;
use crate::error::Error;
use crate::error::QueryError;
use crate::model::EoxResponse;
use crate::rate_limit::Pacer;

/// The main client for the Cisco EoX API.
///
/// Cheap to clone (uses `Arc` internally) and safe to share across tasks,
/// though requests are always issued strictly one at a time.
///
/// # Example
///
/// ```ignore
/// use cisco_eox::EoxClient;
/// use cisco_eox::auth::{AuthSession, ClientCredentialsFlow};
///
/// let flow = ClientCredentialsFlow::new("my-client-key", "my-client-secret");
/// let session = AuthSession::login(flow).await?;
///
/// let client = EoxClient::builder().token_provider(session).build();
/// let records = client.query_by_product_ids(&["WS-C3750X-48PF-S"]).await?;
/// ```
#[derive(Clone)]
pub struct EoxClient {
    inner: Arc<EoxClientInner>,
}

struct EoxClientInner {
    base_url: String,
    accept: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    query: QueryConfig,
    pacer: Pacer,
}

impl EoxClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> EoxClientBuilder<Missing> {
        EoxClientBuilder::new()
    }

    /// Returns the base URL of the EoX API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the MIME type sent in the `Accept` header.
    pub fn accept(&self) -> &str {
        &self.inner.accept
    }

    pub(crate) fn query_config(&self) -> &QueryConfig {
        &self.inner.query
    }

    /// Issues one paginated GET against `EOXByProductID`.
    ///
    /// Pacing is applied before every request after the first, the token
    /// is fetched from the provider each time, and non-2xx responses fail
    /// with [`QueryError::Http`].
    pub(crate) async fn fetch_page(
        &self,
        page_index: u32,
        joined: &str,
    ) -> Result<EoxResponse, Error> {
        self.inner.pacer.pace().await;

        let token = self.inner.token_provider.get_token().await?;

        let url = format!(
            "{}/EOXByProductID/{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            page_index,
            joined
        );

        tracing::debug!(%url, page_index, "fetching EoX page");

        let response = self
            .inner
            .http_client
            .get(&url)
            .header("Accept", &self.inner.accept)
            .header("Authorization", token.as_header())
            .send()
            .await
            .map_err(QueryError::Transport)?;

        if response.status().is_success() {
            let body = response.text().await.map_err(QueryError::Transport)?;
            let parsed: EoxResponse = serde_json::from_str(&body)
                .map_err(|e| QueryError::parse_with_body(e.to_string(), body))?;
            Ok(parsed)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(Error::Query(QueryError::http(status, body)))
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`EoxClient`].
///
/// Uses the typestate pattern so `build()` only exists once the required
/// token provider has been set.
///
/// # Example
///
/// ```ignore
/// let client = EoxClient::builder()
///     .token_provider(session)
///     .base_url("https://api.cisco.com/supporttools/eox/rest/5")
///     .query_config(QueryConfig::default().page_delay(Duration::from_millis(250)))
///     .build();
/// ```
pub struct EoxClientBuilder<Provider> {
    token_provider: Provider,
    base_url: String,
    accept: String,
    query: QueryConfig,
    http_client: Option<Client>,
}

impl EoxClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            token_provider: Missing,
            base_url: DEFAULT_BASE_URL.to_string(),
            accept: "application/json".to_string(),
            query: QueryConfig::default(),
            http_client: None,
        }
    }

    /// Sets the token provider used to authorize every request.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> EoxClientBuilder<Set<Arc<dyn TokenProvider>>> {
        EoxClientBuilder {
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            base_url: self.base_url,
            accept: self.accept,
            query: self.query,
            http_client: self.http_client,
        }
    }
}

impl Default for EoxClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EoxClientBuilder<P> {
    /// Sets the EoX API base URL.
    ///
    /// Defaults to the public Cisco endpoint; override for mock servers.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the MIME type sent in the `Accept` header.
    ///
    /// Defaults to `application/json`.
    pub fn accept(mut self, mime: impl Into<String>) -> Self {
        self.accept = mime.into();
        self
    }

    /// Sets the batching and pacing configuration.
    pub fn query_config(mut self, config: QueryConfig) -> Self {
        self.query = config;
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl EoxClientBuilder<Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`EoxClient`].
    ///
    /// Only available once a token provider has been set.
    pub fn build(self) -> EoxClient {
        let pacer = Pacer::new(self.query.page_delay);

        EoxClient {
            inner: Arc::new(EoxClientInner {
                base_url: self.base_url,
                accept: self.accept,
                token_provider: self.token_provider.0,
                http_client: self.http_client.unwrap_or_default(),
                query: self.query,
                pacer,
            }),
        }
    }
}
