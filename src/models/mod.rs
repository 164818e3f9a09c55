use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier used to look a movie up at the poster provider (a TMDB movie id)
///
/// Catalog dumps carry it as a JSON number, hand-written files sometimes as a
/// string; both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ExternalId(String);

impl ExternalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExternalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ExternalId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(id) => ExternalId(id.to_string()),
            RawId::Text(id) => ExternalId(id),
        })
    }
}

/// A catalog entry. Its position in the catalog is its row in the similarity matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub external_id: ExternalId,
    pub title: String,
    pub overview: String,
    pub rating: f64,
}

/// A ranked neighbor of the selected movie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub score: f64,
}

/// Recommendation returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub poster_url: String,
    pub overview: String,
    pub rating: f64,
    pub similarity: f64,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of the TMDB `GET /movie/{id}` response the poster lookup needs
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}
