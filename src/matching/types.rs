//! Match outcome types shared between the matcher and its callers.

use crate::models::{ExternalTrack, SearchResult};
use serde::{Deserialize, Serialize};

/// Outcome of resolving one external track against the catalogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum MatchResult {
    /// A single confident match.
    Matched {
        result: SearchResult,
        confidence: f32,
    },
    /// Several plausible candidates; the user should choose. Never empty.
    MultipleOptions { options: Vec<SearchResult> },
    /// No suitable match was found.
    NotFound,
    /// The user chose to skip this track.
    Skipped,
}

/// State of a single track during a batch match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackMatchState {
    pub track: ExternalTrack,
    pub result: MatchResult,
    pub is_processing: bool,
    /// A user-picked result; takes precedence over the automatic outcome.
    pub selected_result: Option<SearchResult>,
}

impl TrackMatchState {
    pub fn new(track: ExternalTrack) -> Self {
        Self {
            track,
            result: MatchResult::NotFound,
            is_processing: false,
            selected_result: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self.result, MatchResult::Matched { .. }) || self.selected_result.is_some()
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.result, MatchResult::Skipped)
    }

    /// The result to show for this track, preferring the user's pick.
    pub fn display_result(&self) -> Option<&SearchResult> {
        self.selected_result.as_ref().or(match &self.result {
            MatchResult::Matched { result, .. } => Some(result),
            _ => None,
        })
    }

    /// Accept one of the offered options as the match.
    pub fn select(&mut self, result: SearchResult) {
        self.selected_result = Some(result.clone());
        self.result = MatchResult::Matched {
            result,
            confidence: 1.0,
        };
    }

    /// Skip this track; clears any earlier selection.
    pub fn skip(&mut self) {
        self.result = MatchResult::Skipped;
        self.selected_result = None;
    }
}
