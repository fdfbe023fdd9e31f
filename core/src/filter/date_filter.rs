use chrono::NaiveDate;

use crate::log::CommitRecord;

/// Keep the records whose calendar date falls inside an inclusive range.
///
/// A `None` bound means "no constraint" on that side.
pub fn filter_records_by_date(
    records: &[CommitRecord],
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Vec<CommitRecord> {
    records
        .iter()
        .filter(|r| {
            let date = r.date();
            let since_ok = since.map_or(true, |s| date >= s);
            let until_ok = until.map_or(true, |u| date <= u);
            since_ok && until_ok
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::TimeSource;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_records() -> Vec<CommitRecord> {
        [("aaa111", ymd(2023, 11, 14)), ("bbb222", ymd(2023, 7, 22)), ("ccc333", ymd(2023, 3, 28))]
            .into_iter()
            .map(|(hash, date)| CommitRecord {
                hash: hash.to_string(),
                author: "Alice".to_string(),
                email: String::new(),
                timestamp: date.and_hms_opt(12, 0, 0).unwrap(),
                time_source: TimeSource::Logged,
                message: "commit".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_filter_since_only() {
        let result = filter_records_by_date(&make_records(), Some(ymd(2023, 9, 1)), None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].hash, "aaa111");
    }

    #[test]
    fn test_filter_until_only() {
        let result = filter_records_by_date(&make_records(), None, Some(ymd(2023, 5, 1)));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].hash, "ccc333");
    }

    #[test]
    fn test_filter_range_is_inclusive() {
        let result =
            filter_records_by_date(&make_records(), Some(ymd(2023, 7, 22)), Some(ymd(2023, 7, 22)));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].hash, "bbb222");
    }

    #[test]
    fn test_filter_no_constraint() {
        assert_eq!(filter_records_by_date(&make_records(), None, None).len(), 3);
    }

    #[test]
    fn test_filter_no_match() {
        let result = filter_records_by_date(&make_records(), Some(ymd(2030, 1, 1)), None);
        assert!(result.is_empty());
    }
}
