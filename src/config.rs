//! Named configuration for endpoints, batching and pacing.

use std::collections::HashSet;
use std::time::Duration;

/// Default Cisco SSO token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://cloudsso.cisco.com/as/token.oauth2";

/// Default base URL of the EoX REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.cisco.com/supporttools/eox/rest/5";

/// Maximum product IDs the API accepts in a single request path.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Default minimum interval between consecutive requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

/// Placeholder identifiers commonly produced by inventory scrapers
/// (e.g. parsed `show inventory` output). Compared case-insensitively.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "",
    "n/a",
    "b",
    "p",
    "^mf",
    "unknown",
    "unspecified",
    "x",
];

/// Configuration for how a bulk query is split up and paced.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use cisco_eox::config::QueryConfig;
///
/// // Defaults: batches of 20, the standard blacklist, 500ms between requests
/// let config = QueryConfig::default();
///
/// // Custom pacing for a mock server
/// let fast = QueryConfig::default().page_delay(Duration::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Maximum identifiers per batch.
    pub batch_size: usize,
    /// Lower-cased identifiers that are never queried.
    pub blacklist: HashSet<String>,
    /// Minimum interval between consecutive requests.
    pub page_delay: Duration,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| (*s).to_string()).collect(),
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

impl QueryConfig {
    /// Sets the maximum number of identifiers per batch.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Replaces the identifier blacklist.
    ///
    /// Entries are lower-cased; matching is case-insensitive.
    pub fn blacklist<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blacklist = entries
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Sets the minimum interval between consecutive requests.
    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Returns `true` if the identifier is blacklisted.
    pub fn is_blacklisted(&self, id: &str) -> bool {
        self.blacklist.contains(&id.to_lowercase())
    }
}
