pub mod types;
pub mod rules;

pub use types::*;

use tracing::debug;

use crate::stats::Profile;
use rules::{Rule, CLOSING_RULES, OPENING_RULES};

struct RoastBuilder {
    fragments: Vec<String>,
    fired: Vec<String>,
    score: u32,
}

impl RoastBuilder {
    fn apply(&mut self, profile: &Profile, rules: &[(&str, Rule)]) {
        for (name, rule) in rules {
            if let Some(fragment) = rule(profile) {
                debug!(rule = *name, weight = fragment.weight, "roast rule fired");
                self.push(name, fragment);
            }
        }
    }

    fn push(&mut self, name: &str, fragment: Fragment) {
        self.score += fragment.weight;
        self.fragments.push(fragment.text);
        self.fired.push(name.to_string());
    }
}

/// Turn a profile into a roast.
///
/// Every rule whose condition holds contributes its text and weight; rules
/// never short-circuit each other. The verdict line is written from the score
/// reached by the opening rules, while the returned severity uses the score
/// after all rules.
pub fn generate_roast(profile: Profile) -> RoastResult {
    let mut builder = RoastBuilder {
        fragments: Vec::new(),
        fired: Vec::new(),
        score: 0,
    };

    builder.apply(&profile, OPENING_RULES);
    let provisional_severity = Severity::provisional(builder.score);
    builder.push("verdict", rules::verdict(provisional_severity));
    builder.apply(&profile, CLOSING_RULES);

    let severity = Severity::from_score(builder.score);

    RoastResult {
        roast_text: builder.fragments.join(" "),
        severity,
        severity_score: builder.score,
        provisional_severity,
        fired_rules: builder.fired,
        profile,
    }
}
