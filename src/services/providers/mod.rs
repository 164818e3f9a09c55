//! Poster image providers
//!
//! A provider turns a movie's external id into an image URL the client can
//! display. Lookups never fail towards the caller: whatever goes wrong, the
//! provider answers with [`PLACEHOLDER_POSTER_URL`].
use crate::models::ExternalId;

pub mod tmdb;

pub use tmdb::TmdbPosterProvider;

/// Image shown when no poster is available
pub const PLACEHOLDER_POSTER_URL: &str =
    "https://via.placeholder.com/500x750?text=No+Image+Available";

/// Trait for poster image providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Poster URL for the movie, or the placeholder on any failure
    async fn fetch_poster(&self, external_id: &ExternalId) -> String;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Provider used when no poster API is configured
#[derive(Debug, Clone, Default)]
pub struct PlaceholderPosterProvider;

#[async_trait::async_trait]
impl PosterProvider for PlaceholderPosterProvider {
    async fn fetch_poster(&self, _external_id: &ExternalId) -> String {
        PLACEHOLDER_POSTER_URL.to_string()
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}
