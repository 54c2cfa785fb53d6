use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceType {
    Youtube,
    Soundcloud,
    Bandcamp,
    Local,
}

impl SourceType {
    pub fn as_str(&self) -> &str {
        match self {
            SourceType::Youtube => "YOUTUBE",
            SourceType::Soundcloud => "SOUNDCLOUD",
            SourceType::Bandcamp => "BANDCAMP",
            SourceType::Local => "LOCAL",
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "YOUTUBE" => Ok(SourceType::Youtube),
            "SOUNDCLOUD" => Ok(SourceType::Soundcloud),
            "BANDCAMP" => Ok(SourceType::Bandcamp),
            "LOCAL" => Ok(SourceType::Local),
            _ => Err(format!("Invalid source type: {}", s)),
        }
    }
}

/// A track imported from an external playlist, waiting to be resolved
/// against the searchable catalogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalTrack {
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration_ms: u64,
}

impl ExternalTrack {
    /// Search query used to look this track up on other platforms.
    pub fn search_query(&self) -> String {
        format!("{} {}", self.artist, self.name)
    }
}

/// One candidate returned by a catalog search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub thumbnail_url: Option<String>,
    pub duration_ms: u64,
    pub source_type: SourceType,
    /// Original source ID for re-fetching stream URLs.
    pub source_id: String,
    pub source_url: Option<String>,
}

impl SearchResult {
    /// Convert an accepted result into a library track.
    pub fn into_song(self) -> Song {
        Song {
            id: self.id,
            title: self.title,
            artist: self.artist,
            album: None,
            duration_ms: self.duration_ms,
            thumbnail_url: self.thumbnail_url,
            source_type: self.source_type,
            source_id: self.source_id,
            source_url: self.source_url,
            genre: None,
        }
    }
}

/// A track already in the user's library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration_ms: u64,
    pub thumbnail_url: Option<String>,
    pub source_type: SourceType,
    pub source_id: String,
    pub source_url: Option<String>,
    pub genre: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_source_type_round_trip() {
        assert_eq!(SourceType::from_str("youtube"), Ok(SourceType::Youtube));
        assert_eq!(SourceType::from_str("SOUNDCLOUD"), Ok(SourceType::Soundcloud));
        assert_eq!(SourceType::Youtube.as_str(), "YOUTUBE");
        assert!(SourceType::from_str("spotify").is_err());
    }

    #[test]
    fn test_search_query_is_artist_then_name() {
        let track = ExternalTrack {
            name: "Bohemian Rhapsody".to_string(),
            artist: "Queen".to_string(),
            album: None,
            duration_ms: 354_000,
        };
        assert_eq!(track.search_query(), "Queen Bohemian Rhapsody");
    }
}
