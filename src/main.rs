use std::sync::Arc;

use title_recommender::api::{create_router, AppState, CountLimits};
use title_recommender::config::Config;
use title_recommender::services::CsvCatalogSource;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let settings = config.engine_settings()?;
    let content_type = config.content_type()?;
    let (default_count, max_count) = config.count_limits()?;

    let source = Arc::new(CsvCatalogSource::new(&config.movies_path, &config.shows_path));
    let state = AppState::load(
        source,
        settings,
        content_type,
        CountLimits {
            default_count,
            max_count,
        },
    )
    .await?;

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        content_type = %content_type,
        strategy = %settings.strategy,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
