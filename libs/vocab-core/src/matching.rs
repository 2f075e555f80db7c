//! Answer matching for typed translations.

use crate::types::MatchingMode;

/// Result of comparing a typed answer to the expected translation.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    /// The matching mode used.
    pub matching_mode: MatchingMode,
}

/// Compare a typed answer to the expected translation.
///
/// `Exact` compares the strings as they are, including case and whitespace.
/// The other modes collapse whitespace and ignore case first.
pub fn compare_answers(
    typed: &str,
    expected: &str,
    mode: MatchingMode,
    fuzzy_threshold: f64,
) -> MatchResult {
    match mode {
        MatchingMode::Exact => exact(typed == expected, mode),
        MatchingMode::CaseInsensitive => {
            let is_correct = normalize(typed) == normalize(expected);
            exact(is_correct, mode)
        }
        MatchingMode::Fuzzy => {
            let similarity = normalized_similarity(&normalize(typed), &normalize(expected));
            MatchResult {
                is_correct: similarity >= fuzzy_threshold,
                similarity,
                matching_mode: mode,
            }
        }
    }
}

fn exact(is_correct: bool, matching_mode: MatchingMode) -> MatchResult {
    MatchResult {
        is_correct,
        similarity: if is_correct { 1.0 } else { 0.0 },
        matching_mode,
    }
}

/// Trim, collapse runs of whitespace and lowercase.
fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Calculate Levenshtein distance between two strings, in chars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Calculate normalized similarity (0.0 to 1.0) based on Levenshtein distance.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}
