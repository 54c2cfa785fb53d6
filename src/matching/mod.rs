//! Fuzzy matching of external playlist tracks to catalog entries.
//!
//! Scores search candidates on title, artist and duration similarity and
//! classifies each track as matched, ambiguous or unmatched.

pub mod matcher;
pub mod similarity;
pub mod types;

pub use matcher::SongMatcher;
pub use types::{MatchResult, TrackMatchState};
