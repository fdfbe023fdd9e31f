use crate::config::AnalyzerConfig;

/// Split a commit message into rankable words.
///
/// The message is lower-cased, every character that is neither a word
/// character nor whitespace becomes a space, and the remaining tokens are
/// kept when longer than two characters and not a stop word.
pub fn extract_words(message: &str, config: &AnalyzerConfig) -> Vec<String> {
    let cleaned: String = message
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && !config.is_stop_word(w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_words_punctuation_and_case() {
        let config = AnalyzerConfig::default();
        let words = extract_words("feat(parser): Handle UTF-8 input, finally!", &config);
        assert_eq!(words, vec!["feat", "parser", "handle", "utf", "input", "finally"]);
    }

    #[test]
    fn test_extract_words_drops_short_and_stop_words() {
        let config = AnalyzerConfig::default();
        let words = extract_words("fix a bug in the API for les tests", &config);
        assert_eq!(words, vec!["fix", "bug", "api", "tests"]);
    }

    #[test]
    fn test_extract_words_keeps_accented_letters() {
        let config = AnalyzerConfig::default();
        let words = extract_words("Mise à jour du résumé", &config);
        assert_eq!(words, vec!["mise", "jour", "résumé"]);
    }

    #[test]
    fn test_extract_words_snake_case_is_one_word() {
        let config = AnalyzerConfig::default();
        assert_eq!(extract_words("rename busiest_day", &config), vec!["rename", "busiest_day"]);
    }
}
