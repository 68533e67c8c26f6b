//! Entry point: load config, wire dependencies, and run the server.

use accounts::auth::JwtSecret;
use accounts::config::Config;
use accounts::db;
use accounts::services::{AuthService, SqlCredentialStore};
use accounts::{create_app, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.uses_default_jwt_secret() {
        tracing::warn!("JWT_SECRET not set; using the development placeholder");
    }

    let db_pool = db::create_pool(&config.database_url).await?;
    let store = Arc::new(SqlCredentialStore::new(db_pool.clone()));
    let auth_service = AuthService::new(store, JwtSecret::new(config.jwt_secret.clone()));

    let state = AppState {
        db: db_pool,
        auth_service,
    };
    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
