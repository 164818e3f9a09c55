use std::{sync::Arc, time::Duration};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_recommender::{
    config::Config,
    db::load_data,
    routes::{create_router, AppState},
    services::{
        providers::{PlaceholderPosterProvider, PosterProvider, TmdbPosterProvider},
        Recommender,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recommender=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (catalog, similarity) = load_data(&config.catalog_path, &config.similarity_path)?;

    let poster_provider: Arc<dyn PosterProvider> = match &config.tmdb_api_key {
        Some(api_key) => Arc::new(TmdbPosterProvider::new(
            api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_url.clone(),
            Duration::from_secs(config.poster_timeout_secs),
        )?),
        None => {
            tracing::warn!("TMDB_API_KEY not set, all posters will be placeholders");
            Arc::new(PlaceholderPosterProvider)
        }
    };

    tracing::info!(
        movies = catalog.len(),
        poster_provider = poster_provider.name(),
        "Recommender ready"
    );

    let state = Arc::new(AppState {
        recommender: Recommender::new(Arc::new(catalog), Arc::new(similarity), poster_provider),
        default_count: config.recommendation_count,
    });

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
