//! String and duration comparison primitives shared by the matcher and the
//! recommendation engine. Pure functions, no state, no I/O.

use std::collections::HashSet;

/// Duration tolerance (15 seconds).
const DURATION_TOLERANCE_MS: u64 = 15_000;

/// Similarity between two strings in `[0, 1]`.
///
/// Combines exact comparison, containment, word-set overlap and edit
/// distance. Callers are expected to lower-case and clean the inputs first.
pub fn string_similarity(a: &str, b: &str) -> f32 {
    if a == b {
        return 1.0;
    }
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    // Containment: "bohemian rhapsody" inside "bohemian rhapsody remastered"
    if a.contains(b) || b.contains(a) {
        let len_a = a.chars().count();
        let len_b = b.chars().count();
        return len_a.min(len_b) as f32 / len_a.max(len_b) as f32;
    }

    // Jaccard similarity on words
    let words_a: HashSet<&str> = a.split_whitespace().filter(|w| w.len() > 1).collect();
    let words_b: HashSet<&str> = b.split_whitespace().filter(|w| w.len() > 1).collect();

    if words_a.is_empty() || words_b.is_empty() {
        return levenshtein_similarity(a, b);
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();

    intersection as f32 / union as f32
}

fn levenshtein_similarity(a: &str, b: &str) -> f32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f32 / max_len as f32
}

/// Classic single-character insert/delete/substitute edit distance.
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[m][n]
}

/// Duration proximity score in `[0, 1]`.
pub fn duration_score(a_ms: u64, b_ms: u64) -> f32 {
    let diff = a_ms.abs_diff(b_ms);

    if diff <= 3_000 {
        1.0
    } else if diff <= DURATION_TOLERANCE_MS {
        0.8
    } else if diff <= DURATION_TOLERANCE_MS * 2 {
        0.5
    } else if diff <= DURATION_TOLERANCE_MS * 4 {
        0.2
    } else {
        0.0
    }
}

/// Strip decoration noise from a result title before comparison.
///
/// Removes annotations like "(Official Video)", "[Lyrics]", "(HD)" and the
/// trailing "- Topic" that auto-generated channels append. Cleaning is for
/// scoring only, never for display.
pub fn clean_title(title: &str) -> String {
    let stripped = strip_noise_annotations(title);
    strip_topic_suffix(&stripped).trim().to_string()
}

/// Strip channel decoration from a result artist before comparison.
pub fn clean_artist(artist: &str) -> String {
    let without_topic = strip_topic_suffix(artist);
    let without_vevo = strip_suffix_ci(&without_topic, "vevo").unwrap_or(&without_topic);
    let trimmed = without_vevo.trim_end();
    let cleaned = strip_suffix_ci(trimmed, "official").unwrap_or(trimmed);
    cleaned.trim().to_string()
}

/// Remove "(...)" / "[...]" groups whose content is decoration noise.
fn strip_noise_annotations(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        let open = chars[i];
        if open == '(' || open == '[' {
            let close = if open == '(' { ')' } else { ']' };
            if let Some(len) = chars[i + 1..].iter().position(|&c| c == close) {
                let inner: String = chars[i + 1..i + 1 + len].iter().collect();
                if is_noise_annotation(&inner) {
                    while out.ends_with(char::is_whitespace) {
                        out.pop();
                    }
                    i += len + 2;
                    continue;
                }
            }
        }
        out.push(open);
        i += 1;
    }

    out
}

fn is_noise_annotation(inner: &str) -> bool {
    let lower = inner.trim().to_lowercase();
    lower.starts_with("official")
        || lower.starts_with("lyrics")
        || lower.starts_with("audio")
        || lower == "hd"
        || lower == "hq"
}

fn strip_topic_suffix(s: &str) -> String {
    let trimmed = s.trim_end();
    if let Some(head) = strip_suffix_ci(trimmed, "topic") {
        let head = head.trim_end();
        if let Some(head) = head.strip_suffix('-') {
            return head.trim_end().to_string();
        }
    }
    trimmed.to_string()
}

/// Case-insensitive ASCII suffix strip.
fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    if s.len() < suffix.len() {
        return None;
    }
    let split = s.len() - suffix.len();
    if s.as_bytes()[split..].eq_ignore_ascii_case(suffix.as_bytes()) {
        Some(&s[..split])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(string_similarity("bohemian rhapsody", "bohemian rhapsody"), 1.0);
        assert_eq!(string_similarity("", ""), 1.0);
    }

    #[test]
    fn test_blank_strings() {
        assert_eq!(string_similarity("", "queen"), 0.0);
        assert_eq!(string_similarity("queen", "   "), 0.0);
    }

    #[test]
    fn test_containment_ratio() {
        // 9 chars out of 20
        let score = string_similarity("piano man", "piano man live 1975!");
        assert!((score - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_jaccard_on_words() {
        // {hotel, california} vs {hotel, nevada}: 1 shared of 3
        let score = string_similarity("hotel california", "nevada hotel");
        assert!((score - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_levenshtein_fallback_for_short_tokens() {
        // All tokens length 1, so word sets are empty: edit distance kicks in.
        // "a b" -> "a c" is one substitution over max length 3.
        let score = string_similarity("a b", "a c");
        assert!((score - (1.0 - 1.0 / 3.0)).abs() < 1e-6);
    }

    #[test]
    fn test_duration_score_bands() {
        assert_eq!(duration_score(200_000, 200_000), 1.0);
        assert_eq!(duration_score(200_000, 203_000), 1.0);
        assert_eq!(duration_score(200_000, 203_001), 0.8);
        assert_eq!(duration_score(200_000, 215_000), 0.8);
        assert_eq!(duration_score(200_000, 215_001), 0.5);
        assert_eq!(duration_score(200_000, 230_000), 0.5);
        assert_eq!(duration_score(200_000, 230_001), 0.2);
        assert_eq!(duration_score(200_000, 260_000), 0.2);
        assert_eq!(duration_score(200_000, 260_001), 0.0);
    }

    #[test]
    fn test_duration_score_is_symmetric() {
        assert_eq!(duration_score(100_000, 140_000), duration_score(140_000, 100_000));
    }

    #[test]
    fn test_clean_title_strips_annotations() {
        assert_eq!(clean_title("Bohemian Rhapsody (Official Video)"), "Bohemian Rhapsody");
        assert_eq!(clean_title("Everlong [Official Audio]"), "Everlong");
        assert_eq!(clean_title("Time (Lyrics)"), "Time");
        assert_eq!(clean_title("Africa (HD)"), "Africa");
        assert_eq!(clean_title("Clocks (audio)"), "Clocks");
    }

    #[test]
    fn test_clean_title_keeps_meaningful_parentheses() {
        assert_eq!(clean_title("One (Live at Wembley)"), "One (Live at Wembley)");
        assert_eq!(clean_title("Smooth (feat. Rob Thomas)"), "Smooth (feat. Rob Thomas)");
    }

    #[test]
    fn test_clean_title_strips_topic_suffix() {
        assert_eq!(clean_title("Starlight - Topic"), "Starlight");
        assert_eq!(clean_title("Starlight -Topic"), "Starlight");
    }

    #[test]
    fn test_clean_artist() {
        assert_eq!(clean_artist("QueenVEVO"), "Queen");
        assert_eq!(clean_artist("Queen Official"), "Queen");
        assert_eq!(clean_artist("Queen - Topic"), "Queen");
        assert_eq!(clean_artist("Daft Punk"), "Daft Punk");
        assert_eq!(clean_artist("VEVO"), "");
    }
}
