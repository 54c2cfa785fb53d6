//! Search capability consumed by the matcher and the recommendation engine.
//!
//! Implementations live outside this crate (network clients, local indexes).
//! From the consumers' point of view every call fails soft: the matcher and
//! the engine turn any error into an empty candidate set and log it.

use crate::models::{SearchResult, SourceType};
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Preferred sources in order (YouTube first - more reliable, no paywall).
/// The first entry is treated as the primary source.
pub const DEFAULT_SOURCES: [SourceType; 2] = [SourceType::Youtube, SourceType::Soundcloud];

/// Shared error vocabulary for catalog implementations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Rate limited by upstream source")]
    RateLimited,

    #[error("Source {} is not searchable", .0.as_str())]
    Unsupported(SourceType),
}

#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Free-text search across the given sources, best results first.
    async fn search(&self, query: &str, sources: &[SourceType]) -> Result<Vec<SearchResult>>;

    /// Search for tracks by a specific artist.
    /// Default implementation rewrites the artist into a free-text query.
    async fn search_by_artist(
        &self,
        artist: &str,
        sources: &[SourceType],
    ) -> Result<Vec<SearchResult>> {
        self.search(&format!("{} songs", artist), sources).await
    }

    /// Tracks related to a known catalog entry.
    async fn related(
        &self,
        source_type: SourceType,
        source_id: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>>;
}
