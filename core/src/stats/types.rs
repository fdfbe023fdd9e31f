use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::PatternKeywords;
use crate::log::{CommitRecord, LogFormat};

/// A ranked word from commit messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// A ranked commit author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorCount {
    pub name: String,
    pub email: String,
    pub count: usize,
}

/// Commits in one `YYYY-MM` month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

/// Commit counts per time-of-day bucket.
///
/// Buckets: morning [6,12), afternoon [12,18), evening [18,22),
/// night [22,24) and [0,6).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeOfDayDistribution {
    pub morning: usize,
    pub afternoon: usize,
    pub evening: usize,
    pub night: usize,
}

impl TimeOfDayDistribution {
    pub fn add(&mut self, hour: u32) {
        match hour {
            6..=11 => self.morning += 1,
            12..=17 => self.afternoon += 1,
            18..=21 => self.evening += 1,
            _ => self.night += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.morning + self.afternoon + self.evening + self.night
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayOfWeekDistribution {
    pub monday: usize,
    pub tuesday: usize,
    pub wednesday: usize,
    pub thursday: usize,
    pub friday: usize,
    pub saturday: usize,
    pub sunday: usize,
}

impl DayOfWeekDistribution {
    pub fn add(&mut self, day: Weekday) {
        let slot = match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot += 1;
    }
}

/// Keyword-category counts. One message can land in several categories.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitPatterns {
    pub fixes: usize,
    pub features: usize,
    pub refactors: usize,
    pub tests: usize,
    pub docs: usize,
    pub wip: usize,
    pub merges: usize,
    pub typos: usize,
}

impl CommitPatterns {
    pub fn record(&mut self, message: &str, keywords: &PatternKeywords) {
        let lower = message.to_lowercase();
        let hit = |list: &Vec<String>| contains_any(&lower, list);

        if hit(&keywords.fixes) {
            self.fixes += 1;
        }
        if hit(&keywords.features) {
            self.features += 1;
        }
        if hit(&keywords.refactors) {
            self.refactors += 1;
        }
        if hit(&keywords.tests) {
            self.tests += 1;
        }
        if hit(&keywords.docs) {
            self.docs += 1;
        }
        if hit(&keywords.wip) {
            self.wip += 1;
        }
        if hit(&keywords.merges) {
            self.merges += 1;
        }
        if hit(&keywords.typos) {
            self.typos += 1;
        }
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

/// Statistics that only the advanced (pipe-separated) format can support.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedStats {
    /// Descending by count, first-seen author first on ties.
    pub authors: Vec<AuthorCount>,
    pub top_author: AuthorCount,
    pub day_of_week_distribution: DayOfWeekDistribution,
    /// Ascending by month.
    pub monthly_activity: Vec<MonthCount>,
    pub average_message_length: usize,
    pub productivity_score: u32,
    pub consistency_score: u32,
    pub quality_score: u32,
}

/// The statistical profile of one commit log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub format: LogFormat,
    pub total_commits: usize,
    pub skipped_lines: usize,
    pub commits: Vec<CommitRecord>,
    /// ISO `YYYY-MM-DD` date to commit count.
    pub commits_by_date: BTreeMap<String, usize>,
    pub top_words: Vec<WordCount>,
    pub busiest_day: NaiveDate,
    pub busiest_day_count: usize,
    pub longest_streak: usize,
    pub active_days: usize,
    /// Commits divided by the number of distinct active dates.
    pub average_commits_per_active_day: f64,
    /// Commits divided by whole days elapsed between first and last commit.
    pub average_commits_per_calendar_day: f64,
    /// Whole days between the first and last commit timestamps.
    pub project_age_days: i64,
    /// Calendar days between the first and last commit dates.
    pub span_days: i64,
    pub first_commit: NaiveDate,
    pub last_commit: NaiveDate,
    pub time_of_day_distribution: TimeOfDayDistribution,
    pub commit_patterns: CommitPatterns,
    pub short_message_count: usize,
    pub advanced: Option<AdvancedStats>,
}

impl Profile {
    /// The commits-per-day figure the format itself reports: per active day
    /// for simple logs, per elapsed calendar day for advanced logs.
    pub fn average_commits_per_day(&self) -> f64 {
        match self.format {
            LogFormat::Simple => self.average_commits_per_active_day,
            LogFormat::Advanced => self.average_commits_per_calendar_day,
        }
    }
}
