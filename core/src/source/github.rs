use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::log::LogFormat;

const API_BASE: &str = "https://api.github.com";

fn github_url_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"github\.com/([^/\s]+)/([^/\s?#]+)").ok())
        .as_ref()
}

/// A public GitHub repository, as `owner/repo`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse `owner/repo` or a GitHub URL such as
    /// `https://github.com/owner/repo.git`.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let invalid = || AnalysisError::InvalidRepoRef(input.to_string());

        if input.contains("github.com") {
            let caps = github_url_regex()
                .and_then(|re| re.captures(input))
                .ok_or_else(invalid)?;
            let repo = caps[2].trim_end_matches(".git");
            if repo.is_empty() {
                return Err(invalid());
            }
            return Ok(RepoRef {
                owner: caps[1].to_string(),
                repo: repo.to_string(),
            });
        }

        match input.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(RepoRef {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(invalid()),
        }
    }

    /// The commit-listing endpoint for this repository.
    pub fn commits_url(&self, per_page: u32) -> String {
        format!(
            "{}/repos/{}/{}/commits?per_page={}",
            API_BASE, self.owner, self.repo, per_page
        )
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Deserialize)]
struct ApiCommit {
    sha: String,
    commit: ApiCommitDetail,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetail {
    message: String,
    author: Option<ApiSignature>,
}

#[derive(Debug, Deserialize)]
struct ApiSignature {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    date: Option<String>,
}

/// Log text produced from a commit-listing payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedLog {
    pub git_log: String,
    pub total_commits: usize,
}

/// Convert a GitHub commit-listing JSON payload into log text.
///
/// Simple lines are `hash7 YYYY-MM-DD hour subject`; advanced lines are
/// `hash7|author|email|timestamp|subject`. Times are taken in UTC and only
/// the first line of each message is kept. Pipes are blanked out of simple
/// subjects so no simple line can pass for an advanced one. Commits without a parseable
/// author date are dropped.
pub fn commits_to_log(payload: &str, format: LogFormat) -> Result<ConvertedLog> {
    let commits: Vec<ApiCommit> =
        serde_json::from_str(payload).map_err(|e| AnalysisError::InvalidPayload(e.to_string()))?;

    let mut lines = Vec::with_capacity(commits.len());
    for commit in &commits {
        let Some(author) = commit.commit.author.as_ref() else {
            debug!(sha = %commit.sha, "commit has no author, dropping");
            continue;
        };
        let Some(date) = author
            .date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|d| d.with_timezone(&Utc))
        else {
            debug!(sha = %commit.sha, "commit has no usable date, dropping");
            continue;
        };

        let hash: String = commit.sha.chars().take(7).collect();
        let subject = commit.commit.message.lines().next().unwrap_or("").trim();

        let line = match format {
            LogFormat::Simple => format!(
                "{} {} {} {}",
                hash,
                date.format("%Y-%m-%d"),
                date.format("%-H"),
                subject.replace('|', " ")
            ),
            LogFormat::Advanced => format!(
                "{}|{}|{}|{}|{}",
                hash,
                author.name.replace('|', " "),
                author.email.replace('|', " "),
                date.to_rfc3339(),
                subject
            ),
        };
        lines.push(line);
    }

    if lines.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    Ok(ConvertedLog {
        total_commits: lines.len(),
        git_log: lines.join("\n"),
    })
}
