use regex::Regex;

use crate::error::{AnalysisError, Result};
use crate::log::CommitRecord;

const FILTER_FIELDS: &[&str] = &["author", "message"];

/// Keep the records whose `field` matches a regex.
///
/// Supported fields: "author" and "message".
pub fn filter_records_by_field(
    records: &[CommitRecord],
    field: &str,
    pattern: &str,
) -> Result<Vec<CommitRecord>> {
    if !FILTER_FIELDS.contains(&field) {
        return Err(AnalysisError::InvalidConfig(format!(
            "unknown filter field: {}",
            field
        )));
    }

    let re = Regex::new(pattern)?;

    Ok(records
        .iter()
        .filter(|r| re.is_match(field_value(r, field)))
        .cloned()
        .collect())
}

fn field_value<'a>(record: &'a CommitRecord, field: &str) -> &'a str {
    match field {
        "author" => &record.author,
        _ => &record.message,
    }
}
