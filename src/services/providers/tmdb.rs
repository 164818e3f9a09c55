//! TMDB poster provider
//!
//! API Flow:
//! 1. Details: /movie/{movie_id}?api_key=... → JSON with `poster_path`
//! 2. Image URL: {image_base}/{poster_path}
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{ExternalId, TmdbMovieDetails},
    services::providers::{PosterProvider, PLACEHOLDER_POSTER_URL},
};

#[derive(Clone)]
pub struct TmdbPosterProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbPosterProvider {
    /// Creates a new TMDB provider whose requests give up after `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        image_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url: image_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the image URL from a details response, if it names a poster
    fn poster_url(&self, details: &TmdbMovieDetails) -> Option<String> {
        let path = details.poster_path.as_deref()?.trim_start_matches('/');
        if path.is_empty() {
            return None;
        }
        Some(format!("{}/{}", self.image_url, path))
    }

    /// Fetches the movie details; `Ok(None)` when TMDB has no poster for it
    async fn lookup_poster(&self, external_id: &ExternalId) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url, external_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let details: TmdbMovieDetails = serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(response = %response_text, "Raw TMDB API response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })?;

        Ok(self.poster_url(&details))
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterProvider {
    async fn fetch_poster(&self, external_id: &ExternalId) -> String {
        match self.lookup_poster(external_id).await {
            Ok(Some(url)) => {
                tracing::debug!(movie_id = %external_id, provider = "tmdb", "Poster found");
                url
            }
            Ok(None) => {
                tracing::debug!(
                    movie_id = %external_id,
                    provider = "tmdb",
                    "No poster available, using placeholder"
                );
                PLACEHOLDER_POSTER_URL.to_string()
            }
            Err(e) => {
                tracing::warn!(
                    movie_id = %external_id,
                    provider = "tmdb",
                    error = %e,
                    "Poster lookup failed, using placeholder"
                );
                PLACEHOLDER_POSTER_URL.to_string()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
