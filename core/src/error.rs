use thiserror::Error;

use crate::log::LogFormat;

/// Errors that end an analysis request.
///
/// Malformed lines are not errors: they are skipped and counted on the
/// resulting profile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No valid commit records remained after parsing and filtering.
    #[error("Git log is empty: no valid commits found")]
    EmptyInput,

    /// A line belongs to a different log format than the one in use.
    #[error("Line {line} does not match the {expected} log format")]
    FormatMismatch { line: usize, expected: LogFormat },

    /// A filter regex failed to compile.
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),

    /// Analysis options could not be decoded.
    #[error("Invalid options: {0}")]
    InvalidConfig(String),

    /// A repository reference is neither `owner/repo` nor a GitHub URL.
    #[error("Invalid repository reference: {0}")]
    InvalidRepoRef(String),

    /// A commit-listing payload did not have the expected shape.
    #[error("Invalid commit payload: {0}")]
    InvalidPayload(String),
}

impl From<regex::Error> for AnalysisError {
    fn from(err: regex::Error) -> Self {
        AnalysisError::InvalidPattern(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
