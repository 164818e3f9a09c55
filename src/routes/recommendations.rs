use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::Recommendation,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    /// Number of results; negative values yield an empty list
    pub k: Option<i64>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let Query(params) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let count = match params.k {
        Some(k) => usize::try_from(k).unwrap_or(0),
        None => state.default_count,
    };

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        count = count,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend(&params.title, count).await?;

    Ok(Json(recommendations))
}
