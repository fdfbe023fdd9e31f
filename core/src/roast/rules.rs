use super::types::{Fragment, Severity};
use crate::stats::Profile;

/// A roast rule: inspects the profile and optionally contributes a fragment.
pub type Rule = fn(&Profile) -> Option<Fragment>;

/// Rules evaluated before the verdict line, in order.
pub const OPENING_RULES: &[(&str, Rule)] = &[
    ("commit_count", commit_count),
    ("daily_average", daily_average),
    ("busiest_day", busiest_day),
    ("top_word", top_word),
    ("streak", streak),
    ("night_owl", night_owl),
    ("short_messages", short_messages),
    ("vocabulary", vocabulary),
    ("active_day_ratio", active_day_ratio),
];

/// Rules evaluated after the verdict line, in order.
pub const CLOSING_RULES: &[(&str, Rule)] = &[
    ("single_commit", single_commit),
    ("fix_share", fix_share),
    ("wip", wip),
    ("typos", typos),
    ("refactor_share", refactor_share),
    ("merge_share", merge_share),
    ("missing_tests", missing_tests),
    ("missing_docs", missing_docs),
    ("fix_feature_ratio", fix_feature_ratio),
    ("daily_variance", daily_variance),
];

/// The verdict line for a provisional tier.
pub fn verdict(tier: Severity) -> Fragment {
    let text = match tier {
        Severity::Hard => {
            "Final verdict: a chaotic but dedicated developer. Keep it up (or don't)."
        }
        Severity::Medium => "Final verdict: you code a lot, but with style. Not bad.",
        Severity::Soft => "Final verdict: a balanced developer. Boring but effective.",
    };
    Fragment::new(text, 0)
}

fn percent(part: usize, whole: usize) -> i64 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as i64
}

fn share_exceeds(part: usize, whole: usize, ratio: f64) -> bool {
    part as f64 > whole as f64 * ratio
}

/// Render a number without a trailing `.0`.
fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn commit_count(p: &Profile) -> Option<Fragment> {
    let n = p.total_commits;
    if n > 1000 {
        Some(Fragment::new(
            format!("{} commits. Are you coding or spamming?", n),
            2,
        ))
    } else if n > 500 {
        Some(Fragment::new(format!("{} commits. A true workaholic.", n), 1))
    } else if n < 10 {
        Some(Fragment::new(
            format!("Only {} commits? Do you actually code?", n),
            2,
        ))
    } else {
        None
    }
}

fn daily_average(p: &Profile) -> Option<Fragment> {
    let avg = p.average_commits_per_day();
    if avg > 20.0 {
        Some(Fragment::new(
            format!(
                "You commit {} times a day on average. Touch grass.",
                number(avg)
            ),
            3,
        ))
    } else if avg > 10.0 {
        Some(Fragment::new(
            format!("{} commits a day? Micro-commits much?", number(avg)),
            2,
        ))
    } else {
        None
    }
}

fn busiest_day(p: &Profile) -> Option<Fragment> {
    (p.busiest_day_count > 50).then(|| {
        Fragment::new(
            format!(
                "On {} you made {} commits. Production must have been on fire.",
                p.busiest_day, p.busiest_day_count
            ),
            2,
        )
    })
}

fn top_word(p: &Profile) -> Option<Fragment> {
    let top = p.top_words.first()?;
    match top.word.as_str() {
        "fix" | "bug" => Some(Fragment::new(
            format!(
                "Your favorite word: \"{}\" ({}x). Smells like broken code.",
                top.word, top.count
            ),
            3,
        )),
        "update" | "change" => Some(Fragment::new(
            format!(
                "\"{}\" shows up {} times. Originality level: zero.",
                top.word, top.count
            ),
            1,
        )),
        _ if share_exceeds(top.count, p.total_commits, 0.3) => Some(Fragment::new(
            format!(
                "You use \"{}\" in {}% of your commits. Repetitive much?",
                top.word,
                percent(top.count, p.total_commits)
            ),
            2,
        )),
        _ => None,
    }
}

fn streak(p: &Profile) -> Option<Fragment> {
    let s = p.longest_streak;
    if s > 30 {
        Some(Fragment::new(
            format!("{} days in a row of coding. Do you have a life?", s),
            2,
        ))
    } else if s > 14 {
        Some(Fragment::new(
            format!("A {}-day streak. Respect, but... get some sleep.", s),
            1,
        ))
    } else {
        None
    }
}

fn night_owl(p: &Profile) -> Option<Fragment> {
    let dist = &p.time_of_day_distribution;
    (dist.night > dist.morning * 2).then(|| {
        Fragment::new(
            "You code more at night than in the morning. That explains the bugs.",
            2,
        )
    })
}

fn short_messages(p: &Profile) -> Option<Fragment> {
    share_exceeds(p.short_message_count, p.total_commits, 0.5).then(|| {
        Fragment::new(
            format!(
                "{}% of your commit messages are barely a word. \"fix\" is not a message.",
                percent(p.short_message_count, p.total_commits)
            ),
            3,
        )
    })
}

fn vocabulary(p: &Profile) -> Option<Fragment> {
    (p.top_words.len() < 5 && p.total_commits > 50).then(|| {
        Fragment::new(
            format!(
                "You only use {} different words. Certified dev vocabulary.",
                p.top_words.len()
            ),
            1,
        )
    })
}

fn active_day_ratio(p: &Profile) -> Option<Fragment> {
    if p.span_days <= 0 {
        return None;
    }
    let ratio = p.active_days as f64 / p.span_days as f64;
    (ratio < 0.3).then(|| {
        Fragment::new(
            format!(
                "You only code {}% of the days. Weekend warrior?",
                (ratio * 100.0).round() as i64
            ),
            1,
        )
    })
}

fn single_commit(p: &Profile) -> Option<Fragment> {
    (p.total_commits == 1)
        .then(|| Fragment::new("A single commit? Are you sure this is a repo?", 3))
}

fn fix_share(p: &Profile) -> Option<Fragment> {
    let fixes = p.commit_patterns.fixes;
    share_exceeds(fixes, p.total_commits, 0.4).then(|| {
        Fragment::new(
            format!(
                "{}% of your commits are fixes. Do you test before you push?",
                percent(fixes, p.total_commits)
            ),
            2,
        )
    })
}

fn wip(p: &Profile) -> Option<Fragment> {
    let n = p.commit_patterns.wip;
    (n > 0).then(|| {
        Fragment::new(
            format!("{} \"WIP\" commits. Do you ever finish anything?", n),
            1,
        )
    })
}

fn typos(p: &Profile) -> Option<Fragment> {
    let n = p.commit_patterns.typos;
    (n > 5).then(|| Fragment::new(format!("{} commits for typos. Get a spell checker.", n), 1))
}

fn refactor_share(p: &Profile) -> Option<Fragment> {
    let n = p.commit_patterns.refactors;
    share_exceeds(n, p.total_commits, 0.3).then(|| {
        Fragment::new(
            format!(
                "You refactor {}% of the time. Ever get it right the first time?",
                percent(n, p.total_commits)
            ),
            1,
        )
    })
}

fn merge_share(p: &Profile) -> Option<Fragment> {
    let n = p.commit_patterns.merges;
    share_exceeds(n, p.total_commits, 0.2).then(|| {
        Fragment::new(
            format!("{} merges. Working alone, or just bad at branches?", n),
            1,
        )
    })
}

fn missing_tests(p: &Profile) -> Option<Fragment> {
    let n = p.commit_patterns.tests;
    ((n as f64) < p.total_commits as f64 * 0.1 && p.total_commits > 50).then(|| {
        Fragment::new(
            format!(
                "Only {} test commits out of {}. Sure it works?",
                n, p.total_commits
            ),
            2,
        )
    })
}

fn missing_docs(p: &Profile) -> Option<Fragment> {
    (p.commit_patterns.docs == 0 && p.total_commits > 30).then(|| {
        Fragment::new(
            "Zero documentation commits. Docs are for the weak, right?",
            1,
        )
    })
}

fn fix_feature_ratio(p: &Profile) -> Option<Fragment> {
    let fixes = p.commit_patterns.fixes;
    let features = p.commit_patterns.features;
    (fixes > features * 2 && p.total_commits > 20).then(|| {
        Fragment::new(
            format!(
                "You fixed {} bugs for {} features. Building or repairing?",
                fixes, features
            ),
            2,
        )
    })
}

fn daily_variance(p: &Profile) -> Option<Fragment> {
    let max = p.commits_by_date.values().copied().max()?;
    let min = p.commits_by_date.values().copied().min()?;
    (max > min * 10 && p.total_commits > 50).then(|| {
        Fragment::new(
            format!(
                "You swing from {} to {} commits a day. Inconsistency level 100.",
                min, max
            ),
            1,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::log::parse_log;
    use crate::stats::compute_profile;

    fn profile_of(log: &str) -> Profile {
        let parsed = parse_log(log, None).unwrap();
        compute_profile(parsed, &AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(21.0), "21");
        assert_eq!(number(12.5), "12.5");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn test_commit_count_low() {
        let p = profile_of("abc1234 2024-01-15 10 initial commit\n");
        let f = commit_count(&p).unwrap();
        assert_eq!(f.weight, 2);
        assert!(f.text.contains("Only 1 commits"));
    }

    #[test]
    fn test_top_word_fix() {
        let p = profile_of("aa 2024-01-01 fix parser\nbb 2024-01-02 fix lexer\ncc 2024-01-03 tidy\n");
        let f = top_word(&p).unwrap();
        assert_eq!(f.weight, 3);
        assert!(f.text.contains("\"fix\" (2x)"));
    }

    #[test]
    fn test_top_word_update() {
        let p = profile_of("aa 2024-01-01 update\n");
        assert_eq!(top_word(&p).unwrap().weight, 1);
    }

    #[test]
    fn test_night_owl() {
        let log = "aa 2024-01-01 23 late\nbb 2024-01-02 2 later\ncc 2024-01-03 9 early\n";
        assert!(night_owl(&profile_of(log)).is_none());
        let log = "aa 2024-01-01 23 late\nbb 2024-01-02 2 later\ncc 2024-01-03 3 latest\n";
        assert_eq!(night_owl(&profile_of(log)).unwrap().weight, 2);
    }

    #[test]
    fn test_active_day_ratio() {
        // 2 active days over a 10-day span
        let p = profile_of("aa 2024-01-01 first\nbb 2024-01-11 second\n");
        let f = active_day_ratio(&p).unwrap();
        assert!(f.text.contains("20%"));
    }

    #[test]
    fn test_wip_and_merges() {
        let p = profile_of("aa 2024-01-01 WIP parser\nbb 2024-01-02 Merge branch dev\ncc 2024-01-03 work in progress\n");
        assert!(wip(&p).unwrap().text.starts_with("2 \"WIP\""));
        assert!(merge_share(&p).is_some());
    }

    #[test]
    fn test_verdict_wording_per_tier() {
        assert!(verdict(Severity::Hard).text.contains("chaotic"));
        assert!(verdict(Severity::Medium).text.contains("style"));
        assert!(verdict(Severity::Soft).text.contains("balanced"));
        assert_eq!(verdict(Severity::Hard).weight, 0);
    }

    #[test]
    fn test_rule_names_unique() {
        let mut names: Vec<&str> = OPENING_RULES
            .iter()
            .chain(CLOSING_RULES.iter())
            .map(|(name, _)| *name)
            .collect();
        let before = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), before);
    }
}
