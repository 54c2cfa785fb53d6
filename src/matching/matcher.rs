//! Resolves external playlist tracks against catalog search results.
//!
//! Candidates are scored on title, artist and duration similarity; the best
//! one is classified by confidence, with the runner-ups offered as options
//! when no single result is convincing.

use crate::catalog::{CatalogSearch, DEFAULT_SOURCES};
use crate::matching::similarity::{clean_artist, clean_title, duration_score, string_similarity};
use crate::matching::types::{MatchResult, TrackMatchState};
use crate::models::{ExternalTrack, SearchResult, SourceType};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

/// Combined score at or above which the top candidate is accepted outright.
const HIGH_CONFIDENCE_THRESHOLD: f32 = 0.8;
/// Combined score at or above which candidates are worth offering.
const MEDIUM_CONFIDENCE_THRESHOLD: f32 = 0.5;
/// Candidates offered when the match is not accepted outright.
const MAX_OPTIONS: usize = 3;
/// Rate limiting delay between batch searches.
const SEARCH_DELAY: Duration = Duration::from_millis(300);
/// Small bonus for results from the primary source.
const PRIMARY_SOURCE_BONUS: f32 = 0.03;

/// Matches external tracks to their catalog equivalents.
pub struct SongMatcher {
    catalog: Arc<dyn CatalogSearch>,
    sources: Vec<SourceType>,
}

impl SongMatcher {
    pub fn new(catalog: Arc<dyn CatalogSearch>) -> Self {
        Self {
            catalog,
            sources: DEFAULT_SOURCES.to_vec(),
        }
    }

    /// Override the preferred sources. The first entry is treated as the
    /// primary source and earns the scoring bonus.
    pub fn with_sources(mut self, sources: Vec<SourceType>) -> Self {
        self.sources = sources;
        self
    }

    /// Find the best catalog match for an external track.
    ///
    /// A failed or empty search yields [`MatchResult::NotFound`]; search
    /// errors never propagate.
    pub async fn find_match(&self, track: &ExternalTrack) -> MatchResult {
        log::debug!("Finding match for: {} - {}", track.artist, track.name);

        let query = track.search_query();
        let results = match self.catalog.search(&query, &self.sources).await {
            Ok(results) => results,
            Err(e) => {
                log::warn!("Search failed for '{}': {}", query, e);
                return MatchResult::NotFound;
            }
        };

        if results.is_empty() {
            log::debug!("No results found for: {}", query);
            return MatchResult::NotFound;
        }

        let mut scored: Vec<(SearchResult, f32)> = results
            .into_iter()
            .map(|result| {
                let score = self.match_score(track, &result);
                (result, score)
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let top_score = scored[0].1;
        log::debug!("Best match: {} with score {:.3}", scored[0].0.title, top_score);

        if top_score >= HIGH_CONFIDENCE_THRESHOLD {
            let (result, confidence) = scored.swap_remove(0);
            MatchResult::Matched { result, confidence }
        } else if top_score >= MEDIUM_CONFIDENCE_THRESHOLD {
            if scored.len() == 1 {
                let (result, confidence) = scored.swap_remove(0);
                MatchResult::Matched { result, confidence }
            } else {
                MatchResult::MultipleOptions {
                    options: top_options(scored),
                }
            }
        } else {
            // A weak top hit is still offered as a choice rather than dropped.
            MatchResult::MultipleOptions {
                options: top_options(scored),
            }
        }
    }

    /// Match a whole list of external tracks sequentially.
    ///
    /// `on_matched` fires once per track in input order; `on_progress`
    /// receives the completed fraction and reaches 1.0 with the final
    /// track. A fixed delay between items respects upstream rate limits.
    /// A failed item degrades to `NotFound` without aborting the batch.
    pub async fn match_all<P, M>(
        &self,
        tracks: &[ExternalTrack],
        mut on_progress: P,
        mut on_matched: M,
    ) -> Vec<TrackMatchState>
    where
        P: FnMut(f32),
        M: FnMut(usize, &TrackMatchState),
    {
        let mut states = Vec::with_capacity(tracks.len());

        for (index, track) in tracks.iter().enumerate() {
            let result = self.find_match(track).await;

            let selected_result = match &result {
                MatchResult::Matched { result, .. } => Some(result.clone()),
                _ => None,
            };
            let state = TrackMatchState {
                track: track.clone(),
                result,
                is_processing: false,
                selected_result,
            };

            on_matched(index, &state);
            on_progress((index + 1) as f32 / tracks.len() as f32);
            states.push(state);

            if index < tracks.len() - 1 {
                tokio::time::sleep(SEARCH_DELAY).await;
            }
        }

        states
    }

    /// Combined match score in `[0, 1]`: title and artist similarity weigh
    /// 40% each, duration proximity 20%, plus the primary-source bonus.
    fn match_score(&self, track: &ExternalTrack, result: &SearchResult) -> f32 {
        let mut score = 0.0;

        let title_similarity = string_similarity(
            &track.name.to_lowercase(),
            &clean_title(&result.title).to_lowercase(),
        );
        score += title_similarity * 0.4;

        let artist_similarity = string_similarity(
            &track.artist.to_lowercase(),
            &clean_artist(&result.artist).to_lowercase(),
        );
        score += artist_similarity * 0.4;

        score += duration_score(track.duration_ms, result.duration_ms) * 0.2;

        if self.sources.first() == Some(&result.source_type) {
            score = (score + PRIMARY_SOURCE_BONUS).min(1.0);
        }

        score
    }
}

fn top_options(scored: Vec<(SearchResult, f32)>) -> Vec<SearchResult> {
    scored
        .into_iter()
        .take(MAX_OPTIONS)
        .map(|(result, _)| result)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock::{result, MockCatalog};

    fn track(name: &str, artist: &str, duration_ms: u64) -> ExternalTrack {
        ExternalTrack {
            name: name.to_string(),
            artist: artist.to_string(),
            album: None,
            duration_ms,
        }
    }

    fn matcher(catalog: MockCatalog) -> SongMatcher {
        SongMatcher::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn test_perfect_match_scores_full_confidence() {
        let catalog = MockCatalog::new().on_search(
            "Queen Bohemian Rhapsody",
            vec![result(
                "a",
                "Bohemian Rhapsody (Official Video)",
                "Queen",
                356_000,
            )],
        );
        let track = track("Bohemian Rhapsody", "Queen", 354_000);

        match matcher(catalog).find_match(&track).await {
            MatchResult::Matched { result, confidence } => {
                assert_eq!(result.id, "a");
                assert_eq!(confidence, 1.0);
            }
            other => panic!("expected Matched, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_on_empty_results() {
        let catalog = MockCatalog::new();
        let outcome = matcher(catalog)
            .find_match(&track("Anything", "Anyone", 100_000))
            .await;
        assert!(matches!(outcome, MatchResult::NotFound));
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_not_found() {
        let catalog = MockCatalog::new().fail_on("Anyone Anything");
        let outcome = matcher(catalog)
            .find_match(&track("Anything", "Anyone", 100_000))
            .await;
        assert!(matches!(outcome, MatchResult::NotFound));
    }

    #[tokio::test]
    async fn test_medium_confidence_offers_options() {
        // Right title and duration but the wrong band: lands between the
        // thresholds, so both candidates come back as options.
        let catalog = MockCatalog::new().on_search(
            "Some Band Test Song",
            vec![
                result("a", "Test Song", "Other Band", 200_000),
                result("b", "Test Song (Live)", "Other Band", 200_000),
            ],
        );
        let outcome = matcher(catalog)
            .find_match(&track("Test Song", "Some Band", 200_000))
            .await;

        match outcome {
            MatchResult::MultipleOptions { options } => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[0].id, "a");
                assert_eq!(options[1].id, "b");
            }
            other => panic!("expected MultipleOptions, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_medium_confidence_single_candidate_is_accepted() {
        let catalog = MockCatalog::new().on_search(
            "Some Band Test Song",
            vec![result("a", "Test Song", "Other Band", 200_000)],
        );
        let outcome = matcher(catalog)
            .find_match(&track("Test Song", "Some Band", 200_000))
            .await;
        assert!(matches!(outcome, MatchResult::Matched { .. }));
    }

    #[tokio::test]
    async fn test_high_confidence_boundary_is_exact() {
        // Exact title and artist with a hopeless duration on a non-primary
        // source sums to exactly 0.8, which still counts as high confidence.
        let mut far = result("a", "Edge Case", "Boundary Band", 161_000);
        far.source_type = SourceType::Soundcloud;
        let mut weak = result("b", "Something Else", "Nobody", 500_000);
        weak.source_type = SourceType::Soundcloud;

        let catalog = MockCatalog::new().on_search("Boundary Band Edge Case", vec![far, weak]);
        let outcome = matcher(catalog)
            .find_match(&track("Edge Case", "Boundary Band", 100_000))
            .await;

        match outcome {
            MatchResult::Matched { result, confidence } => {
                assert_eq!(result.id, "a");
                assert_eq!(confidence, 0.8);
            }
            other => panic!("expected Matched at the 0.8 boundary, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_just_below_high_confidence_offers_options() {
        // Exact title but a partly wrong band name and a duration one band
        // off: 0.4 + (1/3)*0.4 + 0.16, short of the 0.8 threshold.
        let mut near = result("a", "Edge Case", "Boundary Crew", 110_000);
        near.source_type = SourceType::Soundcloud;
        let mut other = result("b", "Edge Case", "Nobody", 500_000);
        other.source_type = SourceType::Soundcloud;

        let catalog = MockCatalog::new().on_search("Boundary Band Edge Case", vec![near, other]);
        let outcome = matcher(catalog)
            .find_match(&track("Edge Case", "Boundary Band", 100_000))
            .await;

        match outcome {
            MatchResult::MultipleOptions { options } => assert_eq!(options[0].id, "a"),
            other => panic!("expected MultipleOptions, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_low_confidence_still_offers_the_candidate() {
        let catalog = MockCatalog::new().on_search(
            "Beta Band Alpha",
            vec![result("a", "Gamma Delta", "Epsilon Crew", 900_000)],
        );
        let outcome = matcher(catalog)
            .find_match(&track("Alpha", "Beta Band", 100_000))
            .await;

        match outcome {
            MatchResult::MultipleOptions { options } => assert_eq!(options.len(), 1),
            other => panic!("expected MultipleOptions, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_primary_source_bonus_breaks_ties() {
        let mut sc = result("sc", "Test Song", "Some Band", 200_000);
        sc.source_type = SourceType::Soundcloud;
        let yt = result("yt", "Test Song", "Some Band", 200_000);

        // SoundCloud result arrives first but YouTube earns the bonus.
        let catalog =
            MockCatalog::new().on_search("Some Band Test Song", vec![sc, yt]);
        let outcome = matcher(catalog)
            .find_match(&track("Test Song", "Some Band", 205_000))
            .await;

        match outcome {
            MatchResult::Matched { result, .. } => assert_eq!(result.id, "yt"),
            other => panic!("expected Matched, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_match_all_reports_progress_in_order() {
        let _ = env_logger::builder().is_test(true).try_init();

        let catalog = MockCatalog::new().on_search(
            "Queen Bohemian Rhapsody",
            vec![result("a", "Bohemian Rhapsody", "Queen", 354_000)],
        );
        let tracks = vec![
            track("Bohemian Rhapsody", "Queen", 354_000),
            track("Unknown Song", "Unknown Band", 100_000),
        ];

        let mut seen = Vec::new();
        let mut progress = Vec::new();
        let states = matcher(catalog)
            .match_all(
                &tracks,
                |fraction| progress.push(fraction),
                |index, state| seen.push((index, state.is_matched())),
            )
            .await;

        assert_eq!(states.len(), 2);
        assert_eq!(seen, vec![(0, true), (1, false)]);
        assert_eq!(progress, vec![0.5, 1.0]);

        // High-confidence matches are preselected for the caller.
        assert!(states[0].selected_result.is_some());
        assert!(matches!(states[1].result, MatchResult::NotFound));
        assert!(states[1].selected_result.is_none());
    }

    #[tokio::test]
    async fn test_match_all_empty_input() {
        let catalog = MockCatalog::new();
        let states = matcher(catalog).match_all(&[], |_| {}, |_, _| {}).await;
        assert!(states.is_empty());
    }
}
