//! CSV rendering of EoX records.
//!
//! Produces the flat report format consumed by spreadsheet tooling: one
//! row per record with the fixed EoX column set, nested date objects
//! unwrapped to their `value` payload.

use serde_json::Value;

use crate::model::EoxRecord;

/// Columns of the EoX report, in output order.
pub const REPORT_COLUMNS: [&str; 16] = [
    "EOLProductID",
    "ProductIDDescription",
    "ProductBulletinNumber",
    "LinkToProductBulletinURL",
    "EndOfSWMaintenanceReleases",
    "EOXExternalAnnouncementDate",
    "EndOfSaleDate",
    "EndOfSecurityVulSupportDate",
    "EndOfRoutineFailureAnalysisDate",
    "EndOfServiceContractRenewal",
    "LastDateOfSupport",
    "EndOfSvcAttachDate",
    "UpdatedTimeStamp",
    "EOXMigrationDetails",
    "EOXInputType",
    "EOXInputValue",
];

/// Renders records to CSV with a header row.
///
/// Missing fields render as empty cells. Date-bearing fields are nested
/// objects on the wire; their `value` sub-field is written. Other nested
/// objects (e.g. `EOXMigrationDetails`) are serialized as compact JSON so
/// no information is dropped.
pub fn render_csv(records: &[EoxRecord]) -> String {
    let mut out = String::new();

    out.push_str(&REPORT_COLUMNS.join(","));
    out.push('\n');

    for record in records {
        let row: Vec<String> = REPORT_COLUMNS
            .iter()
            .map(|column| escape_csv(&cell_value(record, column)))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn cell_value(record: &EoxRecord, column: &str) -> String {
    match record.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(obj)) => match obj.get("value").and_then(Value::as_str) {
            Some(value) => value.to_string(),
            None => Value::Object(obj.clone()).to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Quotes a cell per RFC 4180 when it contains a delimiter, quote or newline.
fn escape_csv(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
