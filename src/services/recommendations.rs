use std::sync::Arc;

use crate::{
    db::{Catalog, SimilarityMatrix},
    error::AppResult,
    models::Recommendation,
    services::providers::{PosterProvider, PLACEHOLDER_POSTER_URL},
};

/// Recommends movies similar to a selected title
///
/// Holds the preloaded catalog and similarity matrix, which are never
/// mutated, so one instance is shared by every request.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    similarity: Arc<SimilarityMatrix>,
    poster_provider: Arc<dyn PosterProvider>,
}

impl Recommender {
    pub fn new(
        catalog: Arc<Catalog>,
        similarity: Arc<SimilarityMatrix>,
        poster_provider: Arc<dyn PosterProvider>,
    ) -> Self {
        Self {
            catalog,
            similarity,
            poster_provider,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The `count` movies most similar to `title`, best first, with posters
    ///
    /// Unknown titles fail with `NotFound`. Poster lookups run concurrently
    /// and fall back to the placeholder image, so they never fail the call.
    pub async fn recommend(&self, title: &str, count: usize) -> AppResult<Vec<Recommendation>> {
        let position = self.catalog.resolve(title)?;
        let neighbors = self.similarity.top_k(position, count)?;

        let mut tasks = Vec::with_capacity(neighbors.len());
        for neighbor in &neighbors {
            let movie = self.catalog.fields(neighbor.position)?;
            let provider = self.poster_provider.clone();
            let external_id = movie.external_id.clone();
            let task = tokio::spawn(async move { provider.fetch_poster(&external_id).await });
            tasks.push((movie, neighbor.score, task));
        }

        let mut recommendations = Vec::with_capacity(tasks.len());
        for (movie, similarity, task) in tasks {
            let poster_url = match task.await {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        movie_id = %movie.external_id,
                        "Poster task failed, using placeholder"
                    );
                    PLACEHOLDER_POSTER_URL.to_string()
                }
            };

            recommendations.push(Recommendation {
                title: movie.title.clone(),
                poster_url,
                overview: movie.overview.clone(),
                rating: movie.rating,
                similarity,
            });
        }

        tracing::info!(
            title = %title,
            position = position,
            results = recommendations.len(),
            provider = self.poster_provider.name(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }
}
