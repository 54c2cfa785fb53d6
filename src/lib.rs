//! Cross-catalog track matching and recommendation core for the Resona
//! music player.
//!
//! The crate performs no I/O of its own: callers inject a [`CatalogSearch`]
//! implementation and get structured outcomes back. The worst result of any
//! operation is an empty list or [`MatchResult::NotFound`], never an error.

pub mod catalog;
pub mod matching;
pub mod models;
pub mod recommendations;

pub use catalog::{CatalogError, CatalogSearch};
pub use matching::{MatchResult, SongMatcher, TrackMatchState};
pub use models::{ExternalTrack, SearchResult, Song, SourceType};
pub use recommendations::{PlaylistProfile, RecommendOptions, RecommendationEngine};
