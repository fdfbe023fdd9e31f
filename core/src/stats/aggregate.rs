use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::streak::longest_streak;
use super::tally::Tally;
use super::types::*;
use super::words::extract_words;
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::log::{CommitRecord, LogFormat, ParsedLog};

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn clamp_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

/// Compute the statistical profile of a parsed log.
///
/// Fails with `EmptyInput` when no records are present.
pub fn compute_profile(parsed: ParsedLog, config: &AnalyzerConfig) -> Result<Profile> {
    let ParsedLog {
        format,
        records,
        skipped_lines,
    } = parsed;

    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut by_date: Tally<NaiveDate> = Tally::new();
    let mut words: Tally<String> = Tally::new();
    let mut authors: Tally<(String, String)> = Tally::new();
    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    let mut time_of_day = TimeOfDayDistribution::default();
    let mut day_of_week = DayOfWeekDistribution::default();
    let mut commit_patterns = CommitPatterns::default();
    let mut short_message_count = 0;
    let mut total_message_len = 0;

    for record in &records {
        by_date.add(record.date());
        for word in extract_words(&record.message, config) {
            words.add(word);
        }
        authors.add((record.author.clone(), record.email.clone()));
        *months
            .entry(record.timestamp.format("%Y-%m").to_string())
            .or_insert(0) += 1;

        time_of_day.add(record.hour());
        day_of_week.add(record.timestamp.weekday());
        commit_patterns.record(&record.message, &config.patterns);

        let len = record.message.chars().count();
        total_message_len += len;
        if len < config.short_message_len {
            short_message_count += 1;
        }
    }

    let total_commits = records.len();

    let (busiest_day, busiest_day_count) = by_date
        .max()
        .map(|(day, count)| (*day, count))
        .ok_or(AnalysisError::EmptyInput)?;

    let mut active_dates: Vec<NaiveDate> = by_date.iter().map(|(d, _)| *d).collect();
    active_dates.sort();
    let longest_streak = longest_streak(&active_dates);
    let active_days = active_dates.len();

    let (first_commit, last_commit) = match (active_dates.first(), active_dates.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(AnalysisError::EmptyInput),
    };
    let span_days = (last_commit - first_commit).num_days();
    let project_age_days = elapsed_days(&records);

    let average_commits_per_active_day = round_one_decimal(total_commits as f64 / active_days as f64);
    let average_commits_per_calendar_day = if project_age_days > 0 {
        round_one_decimal(total_commits as f64 / project_age_days as f64)
    } else {
        0.0
    };

    let top_words = words
        .ranked()
        .into_iter()
        .take(config.top_words_limit(format))
        .map(|(word, count)| WordCount { word, count })
        .collect();

    let commits_by_date = by_date
        .iter()
        .map(|(d, c)| (d.format("%Y-%m-%d").to_string(), c))
        .collect();

    let advanced = match format {
        LogFormat::Simple => None,
        LogFormat::Advanced => {
            let authors: Vec<AuthorCount> = authors
                .ranked()
                .into_iter()
                .map(|((name, email), count)| AuthorCount { name, email, count })
                .collect();
            let top_author = authors.first().cloned().unwrap_or(AuthorCount {
                name: "Unknown".to_string(),
                email: String::new(),
                count: 0,
            });
            let age = project_age_days.max(1) as f64;

            Some(AdvancedStats {
                authors,
                top_author,
                day_of_week_distribution: day_of_week,
                monthly_activity: months
                    .into_iter()
                    .map(|(month, count)| MonthCount { month, count })
                    .collect(),
                average_message_length: (total_message_len as f64 / total_commits as f64).round()
                    as usize,
                productivity_score: clamp_score(total_commits as f64 / age * 10.0),
                consistency_score: clamp_score(
                    longest_streak as f64 / (project_age_days as f64 / 7.0).max(1.0) * 100.0,
                ),
                quality_score: clamp_score(
                    (total_commits - short_message_count) as f64 / total_commits as f64 * 100.0,
                ),
            })
        }
    };

    debug!(
        %format,
        total_commits,
        active_days,
        longest_streak,
        "computed commit profile"
    );

    Ok(Profile {
        format,
        total_commits,
        skipped_lines,
        commits: records,
        commits_by_date,
        top_words,
        busiest_day,
        busiest_day_count,
        longest_streak,
        active_days,
        average_commits_per_active_day,
        average_commits_per_calendar_day,
        project_age_days,
        span_days,
        first_commit,
        last_commit,
        time_of_day_distribution: time_of_day,
        commit_patterns,
        short_message_count,
        advanced,
    })
}

/// Whole days between the earliest and latest timestamps.
fn elapsed_days(records: &[CommitRecord]) -> i64 {
    let first = records.iter().map(|r| r.timestamp).min();
    let last = records.iter().map(|r| r.timestamp).max();
    match (first, last) {
        (Some(first), Some(last)) => (last - first).num_days(),
        _ => 0,
    }
}
