//! Async iterator for EoX query pagination.

use crate::EoxClient;
use crate::error::Error;
use crate::model::EoxRecord;

/// Async iterator that yields pages of `EOXByProductID` results for one
/// batch of identifiers.
///
/// Follows the server's `PaginationResponseRecord.LastIndex` cursor,
/// issuing one request per page and pacing between requests. The first
/// failing request latches the iterator: the error is yielded once and
/// subsequent calls return `None`, so a caller that keeps the pages it
/// already received retains a consistent partial result.
///
/// # Example
///
/// ```ignore
/// let mut pages = client.pages(&["WS-C3750X-48PF-S", "C3KX-PWR-1100WAC"]);
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     for record in page.records() {
///         println!("{:?}", record.get_str("EOLProductID"));
///     }
/// }
/// ```
pub struct EoxPages<'a> {
    /// Reference to the client for making requests.
    client: &'a EoxClient,
    /// Comma-joined batch identifiers, one URL path segment.
    joined: String,
    /// Next page to request (1-based).
    page_index: u32,
    /// Whether all pages have been consumed or an error occurred.
    done: bool,
}

impl<'a> EoxPages<'a> {
    pub(crate) fn new<S: AsRef<str>>(client: &'a EoxClient, batch: &[S]) -> Self {
        let joined = batch
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");

        Self {
            client,
            joined,
            page_index: 1,
            done: batch.is_empty(),
        }
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` when all pages have been consumed.
    pub async fn next(&mut self) -> Option<Result<EoxPage, Error>> {
        if self.done {
            return None;
        }

        let response = match self.client.fetch_page(self.page_index, &self.joined).await {
            Ok(resp) => resp,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let page = EoxPage {
            records: response.records,
            page_index: self.page_index,
            last_index: response.pagination.last_index,
            total_records: response.pagination.total_records,
        };

        if self.page_index >= response.pagination.last_index {
            self.done = true;
        } else {
            self.page_index += 1;
        }

        Some(Ok(page))
    }
}

/// A page of EoX query results with pagination information.
#[derive(Debug, Clone)]
pub struct EoxPage {
    records: Vec<EoxRecord>,
    page_index: u32,
    last_index: u32,
    total_records: Option<u32>,
}

impl EoxPage {
    /// Returns a reference to the records in this page, in server order.
    pub fn records(&self) -> &[EoxRecord] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<EoxRecord> {
        self.records
    }

    /// Returns this page's index (1-based).
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Returns the index of the last available page.
    pub fn last_index(&self) -> u32 {
        self.last_index
    }

    /// Returns the total record count across all pages, when reported.
    pub fn total_records(&self) -> Option<u32> {
        self.total_records
    }

    /// Returns `true` if more pages are available after this one.
    pub fn has_more(&self) -> bool {
        self.page_index < self.last_index
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
