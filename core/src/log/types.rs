use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// The two line formats a pasted or fetched log can use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `hash date [hour] message`, whitespace separated.
    Simple,
    /// `hash|author|email|date|message`, pipe separated.
    Advanced,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Simple => "simple",
            LogFormat::Advanced => "advanced",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(LogFormat::Simple),
            "advanced" => Ok(LogFormat::Advanced),
            other => Err(AnalysisError::InvalidConfig(format!(
                "unknown log format: {}",
                other
            ))),
        }
    }
}

/// How the hour of a record's timestamp was obtained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimeSource {
    /// A full timestamp was present in the log.
    Logged,
    /// The simple format carried an explicit hour field.
    HourField,
    /// No time was logged; the hour was derived from the hash.
    HashDerived,
    /// Only a calendar date was logged; the time is midnight.
    DateOnly,
}

/// One normalized commit, produced from one log line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub email: String,
    /// Wall-clock time in the committer's own offset.
    pub timestamp: NaiveDateTime,
    pub time_source: TimeSource,
    pub message: String,
}

impl CommitRecord {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

/// The outcome of parsing a whole log.
#[derive(Debug, Clone)]
pub struct ParsedLog {
    pub format: LogFormat,
    pub records: Vec<CommitRecord>,
    /// Non-blank lines that were rejected as malformed.
    pub skipped_lines: usize,
}
