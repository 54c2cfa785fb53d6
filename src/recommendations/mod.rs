//! Recommendation engine for music discovery.
//!
//! Profiles a set of known tracks, then gathers candidates through
//! independent artist, keyword and related-track strategies before ranking
//! the merged results.

pub mod engine;
pub mod filter;
pub mod profile;
pub mod types;

pub use engine::{RecommendationEngine, DEFAULT_LIMIT};
pub use profile::analyze_playlist;
pub use types::{PlaylistProfile, RecommendOptions};
