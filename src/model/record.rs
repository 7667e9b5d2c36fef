//! EoX record and response types

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// A single EoX record as returned by the server.
///
/// Records are passed through unmodified; field sets vary per product and
/// API revision, so the record is an opaque JSON object with convenience
/// accessors rather than a fixed struct.
///
/// Date-bearing fields (e.g. `EndOfSaleDate`) are nested objects whose
/// payload lives in a `value` sub-field:
///
/// ```json
/// { "EndOfSaleDate": { "value": "2014-01-31", "dateFormat": "YYYY-MM-DD" } }
/// ```
///
/// [`get_date`](Self::get_date) unwraps these.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EoxRecord {
    fields: Map<String, Value>,
}

impl EoxRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the raw field value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the field as a string, if present and a JSON string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Returns the `value` sub-field of a nested date object.
    ///
    /// Falls back to the field itself when it is a plain string.
    pub fn get_date(&self, field: &str) -> Option<&str> {
        match self.fields.get(field)? {
            Value::Object(obj) => obj.get("value").and_then(Value::as_str),
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the record and returns the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for EoxRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// One page of an `EOXByProductID` response.
#[derive(Debug, Clone, Deserialize)]
pub struct EoxResponse {
    /// Records in this page, in server order. Absent when a page carries
    /// only pagination metadata.
    #[serde(rename = "EOXRecord", default)]
    pub records: Vec<EoxRecord>,

    /// Pagination metadata for the batch.
    #[serde(rename = "PaginationResponseRecord")]
    pub pagination: PaginationRecord,
}

/// Server pagination metadata.
///
/// `last_index` bounds how many pages exist for the batch; a query is
/// complete once the requested page index reaches it.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationRecord {
    /// Index of the last available page (1-based).
    #[serde(rename = "LastIndex")]
    pub last_index: u32,

    /// Index of the page this response carries.
    #[serde(rename = "PageIndex", default)]
    pub page_index: u32,

    /// Total number of records across all pages, when reported.
    #[serde(rename = "TotalRecords", default)]
    pub total_records: Option<u32>,

    /// Number of records in this page, when reported.
    #[serde(rename = "PageRecords", default)]
    pub page_records: Option<u32>,
}
