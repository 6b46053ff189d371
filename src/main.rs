use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use consultancy::config::AppConfig;
use consultancy::db;
use consultancy::handlers;
use consultancy::services::auth::StaticCredentials;
use consultancy::services::session::SessionStore;
use consultancy::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    for name in config.insecure_defaults() {
        tracing::warn!("{name} is using its development default; set it before deploying");
    }

    let store = db::connect(&config.database_url);
    tracing::info!(storage = store.backend().as_str(), "storage backend selected");

    let state = Arc::new(AppState {
        store,
        credentials: Box::new(StaticCredentials::from_config(&config)),
        sessions: SessionStore::new(&config.secret_key),
        config: config.clone(),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
