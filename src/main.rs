use anyhow::Context;

use daybook_api::config::Config;
use daybook_api::db::{self, Store};
use daybook_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daybook_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;

    // Database
    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to open database")?;

    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let state = AppState::new(Store::new(pool), config)?;
    if !state.ai.is_enabled() {
        tracing::info!("AI_API_KEY not set; image generation and pattern analysis are disabled");
    }

    let addr = state.config.listen_addr();
    let app = router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
