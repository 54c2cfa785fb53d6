//! Playlist analysis: derives the statistical profile that seeds the
//! recommendation strategies.

use crate::models::{Song, SourceType};
use crate::recommendations::types::PlaylistProfile;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Artists kept in the profile.
const MAX_TOP_ARTISTS: usize = 5;
/// Keywords kept in the profile.
const MAX_KEYWORDS: usize = 10;
/// Weight of a token appearing in a title.
const TITLE_TOKEN_WEIGHT: u32 = 1;
/// Weight of a token appearing in an artist name.
const ARTIST_TOKEN_WEIGHT: u32 = 2;

/// Tokens too generic to describe a taste: English filler plus the
/// decoration vocabulary of uploaded music. Anything of length two or less
/// is already dropped by the tokenizer.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "for", "with", "from", "that", "this", "you", "your",
        "are", "was", "were", "not", "but", "all", "out", "off", "into",
        "over", "under", "about", "after", "before",
        "official", "video", "audio", "lyrics", "music", "song", "feat",
        "remix", "mix", "version", "edit", "extended", "original",
    ]
    .into_iter()
    .collect()
});

/// Derive a profile from a set of known tracks.
///
/// Callers must not pass an empty slice; the recommendation entry points
/// early-return before analysis.
pub fn analyze_playlist(songs: &[Song]) -> PlaylistProfile {
    let mut artist_counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (index, song) in songs.iter().enumerate() {
        let entry = artist_counts
            .entry(song.artist.to_lowercase())
            .or_insert((0, index));
        entry.0 += 1;
    }
    let mut ranked_artists: Vec<(String, (usize, usize))> = artist_counts.into_iter().collect();
    ranked_artists.sort_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
        count_b.cmp(count_a).then(seen_a.cmp(seen_b))
    });
    let top_artists = ranked_artists
        .into_iter()
        .take(MAX_TOP_ARTISTS)
        .map(|(artist, _)| artist)
        .collect();

    let keywords = extract_keywords(songs);

    let avg_duration_ms =
        (songs.iter().map(|s| s.duration_ms).sum::<u64>() as f64 / songs.len() as f64) as u64;

    let mut genres = Vec::new();
    let mut seen_genres = HashSet::new();
    for genre in songs.iter().filter_map(|s| s.genre.as_deref()) {
        if seen_genres.insert(genre) {
            genres.push(genre.to_string());
        }
    }

    let mut source_counts: HashMap<SourceType, (usize, usize)> = HashMap::new();
    for (index, song) in songs.iter().enumerate() {
        let entry = source_counts.entry(song.source_type).or_insert((0, index));
        entry.0 += 1;
    }
    let mut ranked_sources: Vec<(SourceType, (usize, usize))> = source_counts.into_iter().collect();
    ranked_sources.sort_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
        count_b.cmp(count_a).then(seen_a.cmp(seen_b))
    });
    let preferred_sources = ranked_sources
        .into_iter()
        .map(|(source, _)| source)
        .collect();

    PlaylistProfile {
        top_artists,
        keywords,
        avg_duration_ms,
        genres,
        preferred_sources,
    }
}

/// Accumulate token weights across titles and artist names; artist tokens
/// count double. Ties keep first-seen order.
fn extract_keywords(songs: &[Song]) -> Vec<String> {
    let mut weights: HashMap<String, (u32, usize)> = HashMap::new();

    for song in songs {
        for token in tokenize(&song.title) {
            let next = weights.len();
            let entry = weights.entry(token).or_insert((0, next));
            entry.0 += TITLE_TOKEN_WEIGHT;
        }
        for token in tokenize(&song.artist) {
            let next = weights.len();
            let entry = weights.entry(token).or_insert((0, next));
            entry.0 += ARTIST_TOKEN_WEIGHT;
        }
    }

    let mut ranked: Vec<(String, (u32, usize))> = weights.into_iter().collect();
    ranked.sort_by(|(_, (weight_a, seen_a)), (_, (weight_b, seen_b))| {
        weight_b.cmp(weight_a).then(seen_a.cmp(seen_b))
    });
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(token, _)| token)
        .collect()
}

/// Lower-cased alphanumeric tokens longer than two characters, stop words
/// removed.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.len() > 2 && !STOP_WORDS.contains(token))
        .map(|token| token.to_string())
        .collect()
}
