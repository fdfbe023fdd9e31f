use serde::{Deserialize, Serialize};

use crate::stats::Profile;

/// How harsh the overall roast is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Soft,
    Medium,
    Hard,
}

impl Severity {
    /// Final tier: 10 and above is hard, 5 and above is medium.
    pub fn from_score(score: u32) -> Self {
        if score >= 10 {
            Severity::Hard
        } else if score >= 5 {
            Severity::Medium
        } else {
            Severity::Soft
        }
    }

    /// Tier used by the verdict line, which runs mid-way with lower cutoffs
    /// (8 and 4). It can disagree with `from_score`.
    pub fn provisional(score: u32) -> Self {
        if score >= 8 {
            Severity::Hard
        } else if score >= 4 {
            Severity::Medium
        } else {
            Severity::Soft
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Soft => "soft",
            Severity::Medium => "medium",
            Severity::Hard => "hard",
        }
    }
}

/// Text contributed by one triggered rule, and what it adds to the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub weight: u32,
}

impl Fragment {
    pub fn new(text: impl Into<String>, weight: u32) -> Self {
        Fragment {
            text: text.into(),
            weight,
        }
    }
}

/// The generated roast together with the profile it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoastResult {
    /// Triggered fragments joined by single spaces, in rule order.
    pub roast_text: String,
    pub severity: Severity,
    pub severity_score: u32,
    /// The tier the verdict line was written for.
    pub provisional_severity: Severity,
    /// Names of the rules that fired, in order.
    pub fired_rules: Vec<String>,
    pub profile: Profile,
}
