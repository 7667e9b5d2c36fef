//! Bulk EoX queries by product ID.
//!
//! # Example
//!
//! ```ignore
//! use cisco_eox::EoxClient;
//! use cisco_eox::auth::{AuthSession, ClientCredentialsFlow};
//!
//! let session = AuthSession::login(ClientCredentialsFlow::new(key, secret)).await?;
//! let client = EoxClient::builder().token_provider(session).build();
//!
//! let records = client
//!     .query_by_product_ids(&["WS-C3750X-48PF-S", "C3KX-PWR-1100WAC"])
//!     .await?;
//! ```

use crate::EoxClient;
use crate::api::EoxPages;
use crate::api::filter_identifiers;
use crate::api::into_batches;
use crate::error::Error;
use crate::model::EoxRecord;

impl EoxClient {
    /// Queries the EoX API for all records matching the given product IDs.
    ///
    /// Blacklisted identifiers are dropped (case-insensitively) and the
    /// remainder deduplicated first-seen-wins, then partitioned into
    /// batches of at most the configured size. Batches are queried
    /// strictly one at a time, each paginated to completion, with the
    /// configured delay between consecutive requests.
    ///
    /// Returns a fresh record list per call; the client holds no query
    /// state. The first failing request aborts the whole operation and
    /// nothing is returned — callers that want to keep already-fetched
    /// pages on failure should drive [`pages`](Self::pages) per batch
    /// instead.
    pub async fn query_by_product_ids<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<Vec<EoxRecord>, Error> {
        let batches = self.prepare_batches(ids);
        tracing::debug!(
            submitted = ids.len(),
            batches = batches.len(),
            "querying EoX by product ID"
        );

        let mut records = Vec::new();
        for batch in &batches {
            let mut pages = self.pages(batch);
            while let Some(page) = pages.next().await {
                let page = page?;
                records.extend(page.into_records());
            }
        }

        tracing::debug!(records = records.len(), "EoX query complete");
        Ok(records)
    }

    /// Filters, deduplicates and partitions identifiers the same way
    /// [`query_by_product_ids`](Self::query_by_product_ids) does.
    ///
    /// Useful together with [`pages`](Self::pages) when per-batch control
    /// (e.g. keeping partial results across a failure) is needed.
    pub fn prepare_batches<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Vec<String>> {
        let kept = filter_identifiers(ids, self.query_config());
        into_batches(kept, self.query_config().batch_size)
    }

    /// Returns a page iterator for one batch of identifiers.
    ///
    /// The batch is sent as given: no blacklist filtering or size check
    /// is applied here. The API rejects batches over the documented limit
    /// of 20 identifiers.
    pub fn pages<'a, S: AsRef<str>>(&'a self, batch: &[S]) -> EoxPages<'a> {
        EoxPages::new(self, batch)
    }
}
