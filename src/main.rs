mod app;
mod auth;
mod config;
mod db;
mod errors;
mod identity;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::identity::PgIdentityProvider;
use crate::logging::LoggingConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logging first so config and pool failures are visible.
    logging::init_logging(LoggingConfig::from_env()).map_err(|e| anyhow::anyhow!("{e}"))?;

    let config = AppConfig::from_env();
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState {
        pool: pool.clone(),
        tokens: TokenService::new(&config.jwt),
        identity: Arc::new(PgIdentityProvider::new(pool)),
    };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("stockboard backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
