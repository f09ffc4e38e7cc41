use serde::{Deserialize, Serialize};

/// One of the three identifier schemes TVShowTime accepts for an episode.
///
/// Exactly one identifier is sent per request; the serialized field names
/// (`filename`, `episode_id`, `imdb_id`) are what the API expects on the
/// wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeId {
    #[serde(rename = "filename")]
    Filename(String),
    #[serde(rename = "episode_id")]
    TvdbId(String),
    #[serde(rename = "imdb_id")]
    ImdbId(String),
}

impl EpisodeId {
    /// Wire field name and value, for query strings and form bodies.
    pub fn as_param(&self) -> (&'static str, &str) {
        match self {
            Self::Filename(v) => ("filename", v),
            Self::TvdbId(v) => ("episode_id", v),
            Self::ImdbId(v) => ("imdb_id", v),
        }
    }
}
