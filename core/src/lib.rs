pub mod config;
pub mod error;
pub mod filter;
pub mod log;
pub mod roast;
pub mod source;
pub mod stats;

use serde::Serialize;
use tracing::info;
use wasm_bindgen::prelude::*;

pub use config::{AnalyzeOptions, AnalyzerConfig, FormatChoice};
pub use error::AnalysisError;
pub use log::{CommitRecord, LogFormat};
pub use roast::{generate_roast, RoastResult, Severity};
pub use stats::{compute_profile, Profile};

// ---------------------------------------------------------------------------
// Pipeline: parse -> filter -> aggregate -> roast
// ---------------------------------------------------------------------------

/// Parse a log, apply the record filters, and compute its profile.
pub fn build_profile(input: &str, options: &AnalyzeOptions) -> error::Result<Profile> {
    let mut parsed = log::parse_log(input, options.format.forced())?;
    let records = std::mem::take(&mut parsed.records);
    parsed.records = filter::apply_filters(records, options)?;
    stats::compute_profile(parsed, &options.config)
}

/// Run the whole analysis on one log.
pub fn analyze(input: &str, options: &AnalyzeOptions) -> error::Result<RoastResult> {
    let profile = build_profile(input, options)?;
    let result = roast::generate_roast(profile);

    info!(
        format = %result.profile.format,
        total_commits = result.profile.total_commits,
        skipped_lines = result.profile.skipped_lines,
        severity = result.severity.as_str(),
        score = result.severity_score,
        "analysis complete"
    );

    Ok(result)
}

// ---------------------------------------------------------------------------
// JSON helpers for the WASM surface.
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ErrorResult {
    error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RepoResult {
    owner: String,
    repo: String,
    full_name: String,
    commits_url: String,
}

#[derive(Serialize)]
struct FormatResult {
    format: LogFormat,
}

/// Commits requested per page from the listing endpoint.
const COMMITS_PER_PAGE: u32 = 100;

fn json_error(msg: &str) -> String {
    serde_json::to_string(&ErrorResult {
        error: msg.to_string(),
    })
    .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", msg))
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| json_error(&format!("Serialization error: {}", e)))
}

fn respond<T: Serialize>(result: error::Result<T>) -> String {
    match result {
        Ok(value) => to_json(&value),
        Err(e) => json_error(&e.to_string()),
    }
}

fn decode(raw: &[u8]) -> Result<&str, String> {
    std::str::from_utf8(raw).map_err(|e| format!("Log is not valid UTF-8: {}", e))
}

// ---------------------------------------------------------------------------
// WASM-exported functions
// ---------------------------------------------------------------------------

/// Analyze a raw commit log with automatic format detection and default
/// configuration.
///
/// Returns: JSON RoastResult `{ roastText, severity, severityScore,
/// provisionalSeverity, firedRules, profile }`, or `{ error }`.
#[wasm_bindgen]
pub fn analyze_log(raw_log: &[u8]) -> String {
    analyze_log_with_options(raw_log, "")
}

/// Analyze a raw commit log with JSON options.
///
/// Options (all optional): `format` ("auto" | "simple" | "advanced"),
/// `config` (partial AnalyzerConfig), `author` and `message` regexes,
/// `since` and `until` ISO dates.
#[wasm_bindgen]
pub fn analyze_log_with_options(raw_log: &[u8], options_json: &str) -> String {
    let input = match decode(raw_log) {
        Ok(s) => s,
        Err(e) => return json_error(&e),
    };
    respond(AnalyzeOptions::from_json(options_json).and_then(|opts| analyze(input, &opts)))
}

/// Compute only the statistical profile of a raw commit log.
#[wasm_bindgen]
pub fn compute_log_profile(raw_log: &[u8], options_json: &str) -> String {
    let input = match decode(raw_log) {
        Ok(s) => s,
        Err(e) => return json_error(&e),
    };
    respond(AnalyzeOptions::from_json(options_json).and_then(|opts| build_profile(input, &opts)))
}

/// Report which format the log would be parsed as.
///
/// Returns: `{ format: "simple" | "advanced" }`, or `{ error }` for blank input.
#[wasm_bindgen]
pub fn detect_log_format(raw_log: &[u8]) -> String {
    let input = match decode(raw_log) {
        Ok(s) => s,
        Err(e) => return json_error(&e),
    };
    match log::detect_format(input) {
        Some(format) => to_json(&FormatResult { format }),
        None => json_error(&AnalysisError::EmptyInput.to_string()),
    }
}

/// The default AnalyzerConfig, for the frontend to display or tweak.
#[wasm_bindgen]
pub fn default_config() -> String {
    to_json(&AnalyzerConfig::default())
}

/// Parse `owner/repo` or a GitHub URL.
///
/// Returns: `{ owner, repo, fullName, commitsUrl }`, or `{ error }`.
#[wasm_bindgen]
pub fn parse_repo_ref(input: &str) -> String {
    respond(source::RepoRef::parse(input).map(|r| RepoResult {
        commits_url: r.commits_url(COMMITS_PER_PAGE),
        full_name: r.full_name(),
        owner: r.owner,
        repo: r.repo,
    }))
}

/// Convert a GitHub commit-listing payload into log text.
///
/// `format` is "simple" or "advanced"; anything else falls back to "simple".
/// Returns: `{ gitLog, totalCommits }`, or `{ error }`.
#[wasm_bindgen]
pub fn github_commits_to_log(payload: &str, format: &str) -> String {
    let format = format.parse().unwrap_or(LogFormat::Simple);
    respond(source::commits_to_log(payload, format))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn analyze_log_returns_json_in_wasm() {
        let json = analyze_log(b"a1b2c3d 2024-01-15 10 fix bug\ne4f5g6h 2024-01-16 14 add feature\n");
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["profile"]["totalCommits"], 2);
        assert!(parsed["roastText"].as_str().unwrap().contains("Final verdict"));
    }

    #[wasm_bindgen_test]
    fn errors_use_the_json_envelope_in_wasm() {
        let parsed: serde_json::Value = serde_json::from_str(&analyze_log(b"\n")).unwrap();
        assert!(parsed["error"].is_string());
    }
}
