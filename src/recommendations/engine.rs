//! Recommendation engine implementation.
//!
//! Profiles the caller's tracks, then gathers candidates through three
//! independent strategies (artist similarity, keyword discovery, related
//! tracks), scores them, and ranks the merged pool. Sub-queries run
//! concurrently; a failed sub-query only costs its own candidates.

use crate::catalog::{CatalogSearch, DEFAULT_SOURCES};
use crate::models::{SearchResult, Song, SourceType};
use crate::recommendations::filter::is_likely_music;
use crate::recommendations::profile::{analyze_playlist, tokenize};
use crate::recommendations::types::{PlaylistProfile, RecommendOptions};
use futures_util::future::{join3, join_all};
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Default number of recommendations returned.
pub const DEFAULT_LIMIT: usize = 10;

/// Profile artists seeding the artist-similarity strategy.
const ARTIST_SEEDS: usize = 3;
/// Profile keywords seeding the keyword strategy.
const KEYWORD_SEEDS: usize = 3;
/// Input songs seeding the related-tracks strategy.
const RELATED_SEEDS: usize = 3;
/// Related tracks requested per seed song.
const RELATED_PER_SEED: usize = 5;
/// A candidate this close to the playlist's average duration fits the taste.
const DURATION_AFFINITY_MS: u64 = 60_000;

/// A candidate with its strategy score, used only for ranking.
struct ScoredResult {
    result: SearchResult,
    score: f32,
}

/// Engine for generating music recommendations.
///
/// Holds the injected catalog capability; all state is per call.
pub struct RecommendationEngine {
    catalog: Arc<dyn CatalogSearch>,
    sources: Vec<SourceType>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn CatalogSearch>) -> Self {
        Self {
            catalog,
            sources: DEFAULT_SOURCES.to_vec(),
        }
    }

    /// Override the sources the strategies search across.
    pub fn with_sources(mut self, sources: Vec<SourceType>) -> Self {
        self.sources = sources;
        self
    }

    /// Recommend up to `limit` new tracks based on the given songs.
    ///
    /// An empty input yields an empty output without touching the catalog.
    pub async fn recommend(&self, songs: &[Song], limit: usize) -> Vec<SearchResult> {
        self.recommend_with_options(songs, limit, RecommendOptions::default())
            .await
    }

    /// [`recommend`](Self::recommend) with per-call knobs.
    pub async fn recommend_with_options(
        &self,
        songs: &[Song],
        limit: usize,
        options: RecommendOptions,
    ) -> Vec<SearchResult> {
        if songs.is_empty() {
            return Vec::new();
        }

        let profile = analyze_playlist(songs);
        log::debug!(
            "Recommending from {} songs: top artists {:?}, keywords {:?}",
            songs.len(),
            profile.top_artists,
            profile.keywords
        );

        let mut artist_pool = profile.top_artists.clone();
        let mut seed_songs: Vec<&Song> = songs.iter().collect();
        if options.force_refresh {
            let mut rng = rand::rng();
            artist_pool.shuffle(&mut rng);
            seed_songs.shuffle(&mut rng);
        }
        let artist_seeds = &artist_pool[..artist_pool.len().min(ARTIST_SEEDS)];
        let keyword_seeds = &profile.keywords[..profile.keywords.len().min(KEYWORD_SEEDS)];
        let related_seeds = &seed_songs[..seed_songs.len().min(RELATED_SEEDS)];

        // Strategies run concurrently but merge in a fixed order, so the
        // final ranking does not depend on network timing.
        let (artist_hits, keyword_hits, related_hits) = join3(
            join_all(
                artist_seeds
                    .iter()
                    .map(|artist| self.artist_strategy(&profile, artist)),
            ),
            join_all(
                keyword_seeds
                    .iter()
                    .map(|keyword| self.keyword_strategy(&profile, keyword)),
            ),
            join_all(
                related_seeds
                    .iter()
                    .map(|song| self.related_strategy(&profile, song)),
            ),
        )
        .await;

        let mut candidates: Vec<ScoredResult> = artist_hits
            .into_iter()
            .chain(keyword_hits)
            .chain(related_hits)
            .flatten()
            .collect();

        log::debug!("Collected {} raw candidates", candidates.len());

        let known_ids: HashSet<&str> = songs.iter().map(|s| s.id.as_str()).collect();
        let known_titles: HashSet<String> =
            songs.iter().map(|s| normalize_title(&s.title)).collect();

        let mut seen_ids = HashSet::new();
        candidates.retain(|candidate| {
            if known_ids.contains(candidate.result.id.as_str()) {
                return false;
            }
            if known_titles.contains(&normalize_title(&candidate.result.title)) {
                return false;
            }
            if options.music_only && !is_likely_music(&candidate.result) {
                return false;
            }
            seen_ids.insert(candidate.result.id.clone())
        });

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        candidates.truncate(limit);

        log::debug!("Returning {} recommendations", candidates.len());
        candidates.into_iter().map(|c| c.result).collect()
    }

    /// Strategy 1: search for more by the listener's top artists.
    async fn artist_strategy(&self, profile: &PlaylistProfile, artist: &str) -> Vec<ScoredResult> {
        let results = match self.catalog.search_by_artist(artist, &self.sources).await {
            Ok(results) => results,
            Err(e) => {
                log::debug!("Artist search failed for '{}': {}", artist, e);
                return Vec::new();
            }
        };

        results
            .into_iter()
            .map(|result| {
                let score = score_artist_hit(profile, &result);
                ScoredResult { result, score }
            })
            .collect()
    }

    /// Strategy 2: free-text discovery through the profile's keywords.
    async fn keyword_strategy(&self, profile: &PlaylistProfile, keyword: &str) -> Vec<ScoredResult> {
        let results = match self.catalog.search(keyword, &self.sources).await {
            Ok(results) => results,
            Err(e) => {
                log::debug!("Keyword search failed for '{}': {}", keyword, e);
                return Vec::new();
            }
        };

        results
            .into_iter()
            .map(|result| {
                let score = score_keyword_hit(profile, &result);
                ScoredResult { result, score }
            })
            .collect()
    }

    /// Strategy 3: tracks the catalog considers related to the seeds.
    async fn related_strategy(&self, profile: &PlaylistProfile, song: &Song) -> Vec<ScoredResult> {
        let results = match self
            .catalog
            .related(song.source_type, &song.source_id, RELATED_PER_SEED)
            .await
        {
            Ok(results) => results,
            Err(e) => {
                log::debug!("Related lookup failed for '{}': {}", song.title, e);
                return Vec::new();
            }
        };

        results
            .into_iter()
            .map(|result| {
                let score = score_related_hit(profile, &result);
                ScoredResult { result, score }
            })
            .collect()
    }
}

/// Artist-strategy score: favors known artists, familiar keywords and
/// durations close to the playlist average.
fn score_artist_hit(profile: &PlaylistProfile, hit: &SearchResult) -> f32 {
    let mut score = 0.5;
    if is_known_artist(profile, &hit.artist) {
        score += 0.3;
    }
    score += (0.05 * matching_keywords(profile, &hit.title) as f32).min(0.2);
    if hit.duration_ms.abs_diff(profile.avg_duration_ms) < DURATION_AFFINITY_MS {
        score += 0.1;
    }
    score.clamp(0.0, 1.0)
}

/// Keyword-strategy score: mostly keyword overlap, with an artist bump.
fn score_keyword_hit(profile: &PlaylistProfile, hit: &SearchResult) -> f32 {
    let mut score = 0.3;
    score += (0.1 * matching_keywords(profile, &hit.title) as f32).min(0.4);
    if is_known_artist(profile, &hit.artist) {
        score += 0.2;
    }
    score.clamp(0.0, 1.0)
}

/// Related-strategy score: the catalog's own signal is worth a high base.
fn score_related_hit(profile: &PlaylistProfile, hit: &SearchResult) -> f32 {
    let mut score = 0.6;
    if is_known_artist(profile, &hit.artist) {
        score += 0.2;
    }
    score += (0.05 * matching_keywords(profile, &hit.title) as f32).min(0.15);
    score.clamp(0.0, 1.0)
}

fn is_known_artist(profile: &PlaylistProfile, artist: &str) -> bool {
    let artist = artist.to_lowercase();
    profile.top_artists.iter().any(|known| *known == artist)
}

/// How many profile keywords appear as tokens of the title.
fn matching_keywords(profile: &PlaylistProfile, title: &str) -> usize {
    tokenize(title)
        .into_iter()
        .filter(|token| profile.keywords.contains(token))
        .count()
}

/// Normalize a title for duplicate detection: bracketed content, decoration
/// tokens and extra whitespace are gone, case is folded.
fn normalize_title(title: &str) -> String {
    let mut stripped = String::with_capacity(title.len());
    let mut depth = 0i32;
    for c in title.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                continue;
            }
            _ if depth <= 0 => stripped.push(c),
            _ => {}
        }
    }

    let mut lower = stripped.to_lowercase();
    for noise in ["official", "video", "audio", "lyrics", "hd", "hq"] {
        lower = lower.replace(noise, "");
    }

    lower.split_whitespace().collect::<Vec<_>>().join(" ")
}
