//! Heuristics separating actual music from other catalog content.
//!
//! Search sources index everything: podcasts, episode uploads, shorts,
//! vlogs. These checks gate recommendation candidates when the caller asks
//! for music only.

use crate::models::SearchResult;

/// Titles containing any of these are not worth recommending.
const EXCLUDE_KEYWORDS: &[&str] = &[
    "podcast",
    "episode",
    "trailer",
    "teaser",
    "full movie",
    "documentary",
    "interview",
    "reaction",
    "tutorial",
    "how to",
    "review",
    "unboxing",
    "gameplay",
    "walkthrough",
    "compilation",
    "top 10",
    "audiobook",
    "#shorts",
    "tiktok",
    "asmr",
    "vlog",
];

/// Signals that an entry with unknown duration is still a song.
const MUSIC_INDICATORS: &[&str] = &[
    "official video",
    "official audio",
    "official music",
    "lyrics",
    "music video",
    "audio",
    "full song",
    "official",
    "vevo",
    "topic",
    "records",
];

/// Songs usually run 90 seconds to 12 minutes.
const MIN_SONG_SECS: u64 = 90;
const MAX_SONG_SECS: u64 = 720;

/// Whether a search result looks like a playable song rather than shorts,
/// episodes or other non-music uploads.
pub fn is_likely_music(result: &SearchResult) -> bool {
    let title = result.title.to_lowercase();
    let artist = result.artist.to_lowercase();

    // Shorts carry a marker in their URL-shaped source IDs.
    if result.source_id.to_lowercase().contains("shorts") {
        return false;
    }

    if has_episode_marker(&title) {
        return false;
    }

    if EXCLUDE_KEYWORDS.iter().any(|k| title.contains(k)) {
        return false;
    }

    if result.duration_ms > 0 {
        let secs = result.duration_ms / 1000;
        if !(MIN_SONG_SECS..=MAX_SONG_SECS).contains(&secs) {
            return false;
        }
    } else if !MUSIC_INDICATORS
        .iter()
        .any(|k| title.contains(k) || artist.contains(k))
    {
        // Unknown duration needs at least one positive signal.
        return false;
    }

    true
}

/// Detects "s01e01"-style season/episode markers in a lower-cased title.
fn has_episode_marker(title: &str) -> bool {
    let chars: Vec<char> = title.chars().collect();

    for i in 0..chars.len() {
        if chars[i] != 's' || (i > 0 && chars[i - 1].is_alphanumeric()) {
            continue;
        }
        let mut j = i + 1;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j == i + 1 {
            continue;
        }
        let mut k = j;
        while k < chars.len() && chars[k].is_whitespace() {
            k += 1;
        }
        if k < chars.len() && chars[k] == 'e' {
            let mut l = k + 1;
            while l < chars.len() && chars[l].is_ascii_digit() {
                l += 1;
            }
            if l > k + 1 {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock::result;

    #[test]
    fn test_plain_song_passes() {
        assert!(is_likely_music(&result(
            "a",
            "Neon Nights (Official Video)",
            "Midnight Echo",
            210_000
        )));
    }

    #[test]
    fn test_episode_markers_rejected() {
        assert!(!is_likely_music(&result("a", "Breaking Waves s01e04", "Some Channel", 210_000)));
        assert!(!is_likely_music(&result("a", "Breaking Waves S2 E11", "Some Channel", 210_000)));
        // "s" inside a word is not a marker
        assert!(is_likely_music(&result("a", "Echoes1e1 Dreams", "Band", 210_000)));
    }

    #[test]
    fn test_exclude_keywords_rejected() {
        assert!(!is_likely_music(&result("a", "Deep Talk Podcast #12", "Host", 210_000)));
        assert!(!is_likely_music(&result("a", "Album Reaction and Review", "Critic", 210_000)));
    }

    #[test]
    fn test_shorts_source_rejected() {
        let mut short = result("a", "Catchy Hook", "Band", 45_000);
        short.source_id = "https://example.com/shorts/abc".to_string();
        assert!(!is_likely_music(&short));
    }

    #[test]
    fn test_duration_band() {
        assert!(!is_likely_music(&result("a", "Tiny Clip", "Band", 30_000)));
        assert!(!is_likely_music(&result("a", "Hour Mix", "Band", 3_600_000)));
        assert!(is_likely_music(&result("a", "Normal Song", "Band", 240_000)));
    }

    #[test]
    fn test_unknown_duration_needs_music_indicator() {
        assert!(!is_likely_music(&result("a", "Mystery Upload", "Someone", 0)));
        assert!(is_likely_music(&result("a", "Mystery Upload (Official Audio)", "Someone", 0)));
    }
}
