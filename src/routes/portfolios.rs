use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{AddPortfolioRequest, PortfolioMembership, Stock};
use crate::services::portfolio_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_portfolio).post(add_to_portfolio))
        .route("/:symbol", delete(remove_from_portfolio))
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Stock>>, AppError> {
    info!("GET /api/portfolio - Fetching portfolio for {}", user.username);
    let stocks = portfolio_service::get_for_user(&state.pool, user.id)
        .await
        .map_err(|e| {
            error!("Failed to fetch portfolio for {}: {}", user.username, e);
            e
        })?;
    Ok(Json(stocks))
}

pub async fn add_to_portfolio(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddPortfolioRequest>,
) -> Result<Json<PortfolioMembership>, AppError> {
    info!(
        "POST /api/portfolio - Adding {} for {}",
        payload.symbol, user.username
    );
    let membership = portfolio_service::add(&state.pool, user.id, &payload.symbol)
        .await
        .map_err(|e| {
            error!("Failed to add {} to portfolio: {}", payload.symbol, e);
            e
        })?;
    Ok(Json(membership))
}

pub async fn remove_from_portfolio(
    State(state): State<AppState>,
    user: AuthUser,
    Path(symbol): Path<String>,
) -> Result<Json<()>, AppError> {
    info!(
        "DELETE /api/portfolio/{} - Removing for {}",
        symbol, user.username
    );
    portfolio_service::remove(&state.pool, user.id, &symbol)
        .await
        .map_err(|e| {
            error!("Failed to remove {} from portfolio: {}", symbol, e);
            e
        })?;
    Ok(Json(()))
}
