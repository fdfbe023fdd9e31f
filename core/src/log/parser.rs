use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use super::types::{CommitRecord, LogFormat, ParsedLog, TimeSource};
use crate::error::{AnalysisError, Result};

/// Minimum number of pipe-separated fields in an advanced line.
pub const ADVANCED_MIN_FIELDS: usize = 5;

const UNKNOWN_AUTHOR: &str = "Unknown";

/// Whether a line has the shape of the advanced `hash|author|email|date|message` format.
pub fn looks_advanced(line: &str) -> bool {
    line.contains('|') && line.split('|').count() >= ADVANCED_MIN_FIELDS
}

/// Pick the format of a whole log from its first non-blank line.
///
/// Returns `None` when the input has no non-blank line.
pub fn detect_format(input: &str) -> Option<LogFormat> {
    input
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| {
            if looks_advanced(line) {
                LogFormat::Advanced
            } else {
                LogFormat::Simple
            }
        })
}

/// Parse a timestamp as it appears in the advanced format.
///
/// Accepted shapes:
///   `2024-01-15T10:30:00+01:00` / `2024-01-15T10:30:00Z` (RFC 3339)
///   `2024-01-15 10:30:00 +0100` (git `%ai`)
///   `2024-01-15T10:30:00` / `2024-01-15 10:30:00` (no offset)
///   `2024-01-15` (date only)
///
/// Offsets are kept as the committer's wall clock, not converted to UTC.
pub fn parse_timestamp(raw: &str) -> Option<(NaiveDateTime, TimeSource)> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some((dt.naive_local(), TimeSource::Logged));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some((dt.naive_local(), TimeSource::Logged));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some((dt, TimeSource::Logged));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| (dt, TimeSource::DateOnly))
}

/// Parse one advanced line: `hash|author|email|date|message`.
///
/// The message may itself contain pipes; everything after the fourth
/// separator is rejoined.
pub fn parse_advanced_line(line: &str) -> Option<CommitRecord> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < ADVANCED_MIN_FIELDS {
        return None;
    }

    let hash = fields[0].trim();
    if hash.is_empty() {
        return None;
    }

    let (timestamp, time_source) = parse_timestamp(fields[3])?;

    let author = match fields[1].trim() {
        "" => UNKNOWN_AUTHOR,
        name => name,
    };

    Some(CommitRecord {
        hash: hash.to_string(),
        author: author.to_string(),
        email: fields[2].trim().to_string(),
        timestamp,
        time_source,
        message: fields[4..].join("|").trim().to_string(),
    })
}

/// Parse one simple line: `hash date message` or `hash date hour message`.
///
/// The date token is normally `YYYY-MM-DD`; a full timestamp is accepted too
/// and then supplies the time of day. A third token is an hour override only
/// when it is an integer in `0..=23` and a message follows it.
pub fn parse_simple_line(line: &str) -> Option<CommitRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }

    let hash = tokens[0];
    let (logged, logged_source) = parse_timestamp(tokens[1])?;

    let (timestamp, time_source, message_start) = match parse_hour_field(tokens[2]) {
        Some(hour) if tokens.len() >= 4 => (
            logged.date().and_hms_opt(hour, 0, 0)?,
            TimeSource::HourField,
            3,
        ),
        _ if logged_source == TimeSource::Logged => (logged, TimeSource::Logged, 2),
        _ => (
            logged.date().and_hms_opt(hour_from_hash(hash), 0, 0)?,
            TimeSource::HashDerived,
            2,
        ),
    };

    Some(CommitRecord {
        hash: hash.to_string(),
        author: UNKNOWN_AUTHOR.to_string(),
        email: String::new(),
        timestamp,
        time_source,
        message: tokens[message_start..].join(" "),
    })
}

fn parse_hour_field(token: &str) -> Option<u32> {
    token.parse::<u32>().ok().filter(|h| *h < 24)
}

/// Derive a stable hour from the leading hex digits of a hash.
///
/// Reads at most two leading hex characters; a hash with none maps to 0.
fn hour_from_hash(hash: &str) -> u32 {
    let digits: String = hash
        .chars()
        .take(2)
        .take_while(|c| c.is_ascii_hexdigit())
        .collect();
    u32::from_str_radix(&digits, 16)
        .map(|v| v % 24)
        .unwrap_or(0)
}

/// Parse a whole log into commit records.
///
/// When `format` is `None` it is detected from the first non-blank line.
/// Lines that fail to parse are skipped and counted. A line that clearly
/// belongs to the other format aborts the parse with `FormatMismatch`.
pub fn parse_log(input: &str, format: Option<LogFormat>) -> Result<ParsedLog> {
    let format = match format.or_else(|| detect_format(input)) {
        Some(f) => f,
        None => return Err(AnalysisError::EmptyInput),
    };

    let mut records = Vec::new();
    let mut skipped_lines = 0;

    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let parsed = match format {
            LogFormat::Advanced => {
                if looks_advanced(line) {
                    parse_advanced_line(line)
                } else if parse_simple_line(line).is_some() {
                    return Err(AnalysisError::FormatMismatch {
                        line: line_no,
                        expected: format,
                    });
                } else {
                    None
                }
            }
            LogFormat::Simple => {
                // Pipes inside a simple message are fine; only a line that
                // parses as a full advanced record is a mismatch.
                if looks_advanced(line) && parse_advanced_line(line).is_some() {
                    return Err(AnalysisError::FormatMismatch {
                        line: line_no,
                        expected: format,
                    });
                }
                parse_simple_line(line)
            }
        };

        match parsed {
            Some(record) => records.push(record),
            None => {
                skipped_lines += 1;
                debug!(line = line_no, %format, "skipping malformed log line");
            }
        }
    }

    Ok(ParsedLog {
        format,
        records,
        skipped_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format("\n\nabc|Alice|a@e.com|2024-01-15T10:00:00Z|msg\n"),
            Some(LogFormat::Advanced)
        );
        assert_eq!(
            detect_format("abc 2024-01-15 fix bug"),
            Some(LogFormat::Simple)
        );
        // Pipes alone are not enough
        assert_eq!(
            detect_format("abc 2024-01-15 a|b"),
            Some(LogFormat::Simple)
        );
        assert_eq!(detect_format("   \n  \n"), None);
    }

    #[test]
    fn test_parse_simple_with_hour() {
        let record = parse_simple_line("a1b2c3d 2024-01-15 10 fix bug").unwrap();
        assert_eq!(record.hash, "a1b2c3d");
        assert_eq!(record.author, "Unknown");
        assert_eq!(record.email, "");
        assert_eq!(record.date().to_string(), "2024-01-15");
        assert_eq!(record.hour(), 10);
        assert_eq!(record.time_source, TimeSource::HourField);
        assert_eq!(record.message, "fix bug");
    }

    #[test]
    fn test_parse_simple_hour_from_hash() {
        // 0xa1 = 161, 161 % 24 = 17
        let record = parse_simple_line("a1b2c3d 2024-01-15 fix the parser").unwrap();
        assert_eq!(record.hour(), 17);
        assert_eq!(record.time_source, TimeSource::HashDerived);
        assert_eq!(record.message, "fix the parser");
    }

    #[test]
    fn test_parse_simple_non_hex_hash() {
        let record = parse_simple_line("zz12345 2024-01-15 initial").unwrap();
        assert_eq!(record.hour(), 0);
        // Only the leading hex digit counts: 0x3 = 3
        let record = parse_simple_line("3g12345 2024-01-15 initial").unwrap();
        assert_eq!(record.hour(), 3);
    }

    #[test]
    fn test_parse_simple_number_is_message_when_last() {
        let record = parse_simple_line("abc1234 2024-01-15 42").unwrap();
        assert_eq!(record.message, "42");
        assert_eq!(record.time_source, TimeSource::HashDerived);
    }

    #[test]
    fn test_parse_simple_out_of_range_hour_is_message() {
        let record = parse_simple_line("abc1234 2024-01-15 2024 release").unwrap();
        assert_eq!(record.message, "2024 release");
        assert_eq!(record.time_source, TimeSource::HashDerived);
    }

    #[test]
    fn test_parse_simple_full_timestamp_token() {
        let record = parse_simple_line("abc1234 2024-01-15T21:45:00Z late night fix").unwrap();
        assert_eq!(record.hour(), 21);
        assert_eq!(record.time_source, TimeSource::Logged);
        assert_eq!(record.message, "late night fix");
    }

    #[test]
    fn test_parse_simple_rejects() {
        assert!(parse_simple_line("abc1234 2024-01-15").is_none());
        assert!(parse_simple_line("abc1234 yesterday fix bug").is_none());
        assert!(parse_simple_line("abc1234 2024-13-40 fix bug").is_none());
    }

    #[test]
    fn test_parse_advanced_line() {
        let record =
            parse_advanced_line("abc1234|Alice|alice@example.com|2024-03-05T23:15:00+01:00|feat: pipes | in | message")
                .unwrap();
        assert_eq!(record.author, "Alice");
        assert_eq!(record.email, "alice@example.com");
        assert_eq!(record.timestamp.hour(), 23);
        assert_eq!(record.date().to_string(), "2024-03-05");
        assert_eq!(record.message, "feat: pipes | in | message");
        assert_eq!(record.time_source, TimeSource::Logged);
    }

    #[test]
    fn test_parse_advanced_git_iso_date() {
        let record =
            parse_advanced_line("abc1234|Bob|bob@example.com|2024-03-05 08:01:02 -0500|docs").unwrap();
        assert_eq!(record.hour(), 8);
        assert_eq!(record.date().to_string(), "2024-03-05");
    }

    #[test]
    fn test_parse_advanced_date_only_and_empty_author() {
        let record = parse_advanced_line("abc1234||bob@example.com|2024-03-05|docs").unwrap();
        assert_eq!(record.author, "Unknown");
        assert_eq!(record.hour(), 0);
        assert_eq!(record.time_source, TimeSource::DateOnly);
    }

    #[test]
    fn test_parse_advanced_rejects() {
        assert!(parse_advanced_line("abc|Alice|a@e.com|2024-01-15").is_none());
        assert!(parse_advanced_line("abc|Alice|a@e.com|not a date|msg").is_none());
        assert!(parse_advanced_line("|Alice|a@e.com|2024-01-15|msg").is_none());
    }

    #[test]
    fn test_parse_log_skips_malformed() {
        let log = "a1b2c3d 2024-01-15 10 fix bug\n\nbroken\ne4f5g6h 2024-01-16 14 add feature\nxyz notadate hello\n";
        let parsed = parse_log(log, None).unwrap();
        assert_eq!(parsed.format, LogFormat::Simple);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped_lines, 2);
    }

    #[test]
    fn test_parse_log_mismatch_in_advanced() {
        let log = "abc|Alice|a@e.com|2024-01-15T10:00:00Z|first\ndef 2024-01-16 second commit\n";
        let err = parse_log(log, None).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::FormatMismatch {
                line: 2,
                expected: LogFormat::Advanced
            }
        );
    }

    #[test]
    fn test_parse_log_mismatch_in_simple() {
        let log = "def 2024-01-16 first\nabc|Alice|a@e.com|2024-01-15T10:00:00Z|second\n";
        assert!(matches!(
            parse_log(log, None),
            Err(AnalysisError::FormatMismatch { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_log_simple_message_with_pipes() {
        let log = "a1b2c3d 2024-01-15 10 fix bug\ne4f5g6h 2024-01-16 14 table a | b | c | d | e\n";
        let parsed = parse_log(log, None).unwrap();
        assert_eq!(parsed.format, LogFormat::Simple);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped_lines, 0);
        assert_eq!(parsed.records[1].hour(), 14);
        assert_eq!(parsed.records[1].message, "table a | b | c | d | e");

        let forced = parse_log(log, Some(LogFormat::Simple)).unwrap();
        assert_eq!(forced.records.len(), 2);
    }

    #[test]
    fn test_parse_log_explicit_format() {
        let log = "abc|Alice|a@e.com|2024-01-15T10:00:00Z|first\n";
        assert!(parse_log(log, Some(LogFormat::Simple)).is_err());
        let parsed = parse_log(log, Some(LogFormat::Advanced)).unwrap();
        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn test_parse_log_empty() {
        assert_eq!(parse_log("", None).unwrap_err(), AnalysisError::EmptyInput);
        assert_eq!(parse_log(" \n\t\n", None).unwrap_err(), AnalysisError::EmptyInput);
    }

    #[test]
    fn test_parse_log_idempotent() {
        let log = "a1b2c3d 2024-01-15 fix bug\ne4f5g6h 2024-01-16 14 add feature\n";
        let first = parse_log(log, None).unwrap();
        let second = parse_log(log, None).unwrap();
        assert_eq!(first.records, second.records);
    }
}
