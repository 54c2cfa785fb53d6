//! Data types for the recommendation system.

use crate::models::SourceType;
use serde::{Deserialize, Serialize};

/// Aggregate statistics summarizing a set of tracks, recomputed from
/// scratch on every analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistProfile {
    /// Most frequent artists, lower-cased, most frequent first (at most 5).
    pub top_artists: Vec<String>,
    /// Highest-weighted title/artist tokens, heaviest first (at most 10).
    pub keywords: Vec<String>,
    /// Mean track duration in milliseconds.
    pub avg_duration_ms: u64,
    /// Distinct genre tags in first-seen order.
    pub genres: Vec<String>,
    /// Source types ordered by how often they appear.
    pub preferred_sources: Vec<SourceType>,
}

/// Per-call knobs for recommendation generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendOptions {
    /// Shuffle which profile artists and seed songs feed the strategies,
    /// trading stability for variety between calls.
    pub force_refresh: bool,
    /// Drop results that look like non-music content (episodes, shorts,
    /// podcasts).
    pub music_only: bool,
}
