pub mod regex_filter;
pub mod date_filter;

pub use regex_filter::filter_records_by_field;
pub use date_filter::filter_records_by_date;

use tracing::debug;

use crate::config::AnalyzeOptions;
use crate::error::Result;
use crate::log::CommitRecord;

/// Apply every record filter named in `options`, in a fixed order:
/// author, message, then date range.
pub fn apply_filters(records: Vec<CommitRecord>, options: &AnalyzeOptions) -> Result<Vec<CommitRecord>> {
    let before = records.len();
    let mut records = records;

    if let Some(pattern) = options.author.as_deref() {
        records = filter_records_by_field(&records, "author", pattern)?;
    }
    if let Some(pattern) = options.message.as_deref() {
        records = filter_records_by_field(&records, "message", pattern)?;
    }
    if options.since.is_some() || options.until.is_some() {
        records = filter_records_by_date(&records, options.since, options.until);
    }

    if records.len() != before {
        debug!(before, after = records.len(), "record filters applied");
    }
    Ok(records)
}
