//! Text normalization and lightweight lexical analysis.
//!
//! Everything here is rule-based: lowercasing, stripping, stop-word removal,
//! and plural folding. Keyword matching and the offline similarity fallback
//! are both built on [`preprocess_text`].

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// English stop words removed during preprocessing.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Lowercase, drop everything except ASCII letters and whitespace, and
/// collapse runs of whitespace.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace tokens of the normalized text.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Words ending in `s` that are not plurals.
const SINGULAR_S: &[&str] = &[
    "alias", "always", "atlas", "axis", "bias", "canvas", "lens", "news", "perhaps", "series",
    "species", "this", "whereas",
];

/// Fold common English plurals to their singular form.
pub fn lemmatize(token: &str) -> String {
    if SINGULAR_S.contains(&token) {
        return token.to_string();
    }
    if token.len() > 4 && token.ends_with("ies") {
        return format!("{}y", &token[..token.len() - 3]);
    }
    if token.ends_with("sses") {
        return token[..token.len() - 2].to_string();
    }
    if token.len() > 3
        && token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !(token.len() > 4 && token.ends_with("is"))
    {
        return token[..token.len() - 1].to_string();
    }
    token.to_string()
}

/// Preprocessed tokens: normalized, stop words removed, plurals folded.
pub fn preprocess_tokens(text: &str) -> Vec<String> {
    let stops = stop_words();
    tokenize(text)
        .into_iter()
        .filter(|t| !stops.contains(t.as_str()))
        .map(|t| lemmatize(&t))
        .collect()
}

/// Preprocess text into a single space-joined string.
pub fn preprocess_text(text: &str) -> String {
    preprocess_tokens(text).join(" ")
}

/// Count sentences terminated by `.`, `!` or `?`.
///
/// A trailing fragment without terminal punctuation counts as a sentence.
/// Runs of terminators ("...", "?!") end a single sentence.
pub fn sentence_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_sentence = false;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            if in_sentence {
                count += 1;
                in_sentence = false;
            }
        } else if !c.is_whitespace() {
            in_sentence = true;
        }
    }
    if in_sentence {
        count += 1;
    }
    count
}

/// Whether the preprocessed `phrase` occurs as a contiguous token run in
/// `tokens` (which must already be preprocessed).
pub fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let needle = preprocess_tokens(phrase);
    if needle.is_empty() || needle.len() > tokens.len() {
        return false;
    }
    tokens.windows(needle.len()).any(|w| w == needle.as_slice())
}

/// Cosine similarity between term-frequency vectors of the preprocessed
/// texts, in [0, 1].
pub fn lexical_similarity(a: &str, b: &str) -> f64 {
    let tf = |text: &str| -> HashMap<String, f64> {
        let mut counts = HashMap::new();
        for token in preprocess_tokens(text) {
            *counts.entry(token).or_insert(0.0) += 1.0;
        }
        counts
    };

    let ta = tf(a);
    let tb = tf(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let dot: f64 = ta
        .iter()
        .filter_map(|(k, v)| tb.get(k).map(|w| v * w))
        .sum();
    let norm = |m: &HashMap<String, f64>| m.values().map(|v| v * v).sum::<f64>().sqrt();

    (dot / (norm(&ta) * norm(&tb))).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_digits() {
        assert_eq!(normalize("Hello, World! 42 times"), "hello world times");
        assert_eq!(normalize("  A/B   testing "), "ab testing");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn lemmatize_plurals() {
        assert_eq!(lemmatize("strategies"), "strategy");
        assert_eq!(lemmatize("classes"), "class");
        assert_eq!(lemmatize("algorithms"), "algorithm");
        assert_eq!(lemmatize("analysis"), "analysis");
        assert_eq!(lemmatize("status"), "status");
        assert_eq!(lemmatize("bias"), "bias");
        assert_eq!(lemmatize("gas"), "gas");
        assert_eq!(lemmatize("apis"), "api");
        assert_eq!(lemmatize("kpis"), "kpi");
        assert_eq!(lemmatize("basis"), "basis");
        assert_eq!(lemmatize("axis"), "axis");
        assert_eq!(lemmatize("series"), "series");
    }

    #[test]
    fn preprocess_removes_stop_words() {
        assert_eq!(
            preprocess_text("The models are trained on the datasets."),
            "model trained dataset"
        );
    }

    #[test]
    fn sentence_counting() {
        assert_eq!(sentence_count(""), 0);
        assert_eq!(sentence_count("   "), 0);
        assert_eq!(sentence_count("One sentence."), 1);
        assert_eq!(sentence_count("One. Two! Three?"), 3);
        assert_eq!(sentence_count("Wait... what?! Fragment"), 3);
    }

    #[test]
    fn phrase_matching_is_token_aligned() {
        let tokens = preprocess_tokens("We used several design patterns and some testing.");
        assert!(contains_phrase(&tokens, "design patterns"));
        assert!(contains_phrase(&tokens, "testing"));
        assert!(!contains_phrase(&tokens, "code review"));

        // "api" must not match inside "capital".
        let tokens = preprocess_tokens("Raising capital is hard.");
        assert!(!contains_phrase(&tokens, "api"));
    }

    #[test]
    fn lexical_similarity_bounds() {
        assert!((lexical_similarity("clean code", "Clean code!") - 1.0).abs() < 1e-9);
        assert_eq!(lexical_similarity("clean code", "marketing funnel"), 0.0);
        assert_eq!(lexical_similarity("", "anything"), 0.0);
        let partial = lexical_similarity("unit testing matters", "integration testing matters");
        assert!(partial > 0.0 && partial < 1.0);
    }
}
