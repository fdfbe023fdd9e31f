use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::log::LogFormat;

/// Short function words ignored when ranking message vocabulary.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "this", "that", "have", "has", "was", "were", "been",
    "are", "will", "can", "could", "would", "should", "may", "might", "des", "les", "une",
    "dans", "pour", "sur", "avec",
];

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Substrings that put a commit message into a category.
///
/// Matching is case-insensitive substring membership, and categories are
/// independent: "fix tests" counts as both a fix and a test commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PatternKeywords {
    pub fixes: Vec<String>,
    pub features: Vec<String>,
    pub refactors: Vec<String>,
    pub tests: Vec<String>,
    pub docs: Vec<String>,
    pub wip: Vec<String>,
    pub merges: Vec<String>,
    pub typos: Vec<String>,
}

impl Default for PatternKeywords {
    fn default() -> Self {
        PatternKeywords {
            fixes: words(&["fix", "bug"]),
            features: words(&["feat", "feature", "add"]),
            refactors: words(&["refactor"]),
            tests: words(&["test"]),
            docs: words(&["doc", "readme"]),
            wip: words(&["wip", "work in progress"]),
            merges: words(&["merge"]),
            typos: words(&["typo"]),
        }
    }
}

/// Static tuning data for the statistics engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerConfig {
    /// Lower-case words never reported in the top-word ranking.
    pub stop_words: Vec<String>,
    pub patterns: PatternKeywords,
    /// Length of the top-word ranking for simple logs.
    pub simple_top_words: usize,
    /// Length of the top-word ranking for advanced logs.
    pub advanced_top_words: usize,
    /// Messages with fewer characters than this count as short.
    pub short_message_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            stop_words: words(DEFAULT_STOP_WORDS),
            patterns: PatternKeywords::default(),
            simple_top_words: 10,
            advanced_top_words: 20,
            short_message_len: 10,
        }
    }
}

impl AnalyzerConfig {
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.iter().any(|w| w == word)
    }

    pub fn top_words_limit(&self, format: LogFormat) -> usize {
        match format {
            LogFormat::Simple => self.simple_top_words,
            LogFormat::Advanced => self.advanced_top_words,
        }
    }
}

/// Log format requested by the caller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormatChoice {
    /// Detect from the first non-blank line.
    #[default]
    Auto,
    Simple,
    Advanced,
}

impl FormatChoice {
    pub fn forced(self) -> Option<LogFormat> {
        match self {
            FormatChoice::Auto => None,
            FormatChoice::Simple => Some(LogFormat::Simple),
            FormatChoice::Advanced => Some(LogFormat::Advanced),
        }
    }
}

impl FromStr for FormatChoice {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(FormatChoice::Auto),
            other => other.parse::<LogFormat>().map(|f| match f {
                LogFormat::Simple => FormatChoice::Simple,
                LogFormat::Advanced => FormatChoice::Advanced,
            }),
        }
    }
}

/// Per-request analysis choices.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzeOptions {
    pub format: FormatChoice,
    pub config: AnalyzerConfig,
    /// Keep only commits whose author name matches this regex.
    pub author: Option<String>,
    /// Keep only commits whose message matches this regex.
    pub message: Option<String>,
    /// Keep only commits on or after this date.
    pub since: Option<NaiveDate>,
    /// Keep only commits on or before this date.
    pub until: Option<NaiveDate>,
}

impl AnalyzeOptions {
    /// Decode options sent by the frontend. A blank string means defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(AnalyzeOptions::default());
        }
        serde_json::from_str(json).map_err(|e| AnalysisError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stop_words() {
        let config = AnalyzerConfig::default();
        assert!(config.is_stop_word("the"));
        assert!(config.is_stop_word("avec"));
        assert!(!config.is_stop_word("fix"));
        assert_eq!(config.top_words_limit(LogFormat::Simple), 10);
        assert_eq!(config.top_words_limit(LogFormat::Advanced), 20);
    }

    #[test]
    fn test_partial_options_json() {
        let opts = AnalyzeOptions::from_json(
            r#"{"format":"advanced","author":"^Alice$","since":"2024-01-01","config":{"shortMessageLen":5}}"#,
        )
        .unwrap();
        assert_eq!(opts.format, FormatChoice::Advanced);
        assert_eq!(opts.author.as_deref(), Some("^Alice$"));
        assert_eq!(opts.since, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(opts.until, None);
        assert_eq!(opts.config.short_message_len, 5);
        // Unspecified config fields keep their defaults
        assert_eq!(opts.config.simple_top_words, 10);
        assert_eq!(opts.config.patterns, PatternKeywords::default());
    }

    #[test]
    fn test_blank_options_json() {
        assert_eq!(AnalyzeOptions::from_json("").unwrap(), AnalyzeOptions::default());
    }

    #[test]
    fn test_invalid_options_json() {
        assert!(matches!(
            AnalyzeOptions::from_json("{\"format\": 3}"),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_format_choice_from_str() {
        assert_eq!("auto".parse::<FormatChoice>().unwrap(), FormatChoice::Auto);
        assert_eq!("Simple".parse::<FormatChoice>().unwrap(), FormatChoice::Simple);
        assert_eq!(
            "advanced".parse::<FormatChoice>().unwrap().forced(),
            Some(LogFormat::Advanced)
        );
        assert!("yaml".parse::<FormatChoice>().is_err());
    }
}
