use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{LoginRequest, NewUserResponse, RegisterRequest};
use crate::services::account_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<NewUserResponse>, AppError> {
    info!("POST /api/account/register - Registering {}", payload.user_name);
    let response = account_service::register(state.identity.as_ref(), &state.tokens, payload)
        .await
        .map_err(|e| {
            error!("Registration failed: {}", e);
            e
        })?;
    Ok(Json(response))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<NewUserResponse>, AppError> {
    info!("POST /api/account/login - Login attempt for {}", payload.user_name);
    let user_name = payload.user_name.clone();
    let response = account_service::login(state.identity.as_ref(), &state.tokens, payload)
        .await
        .map_err(|e| {
            error!("Login failed for {}: {}", user_name, e);
            e
        })?;
    Ok(Json(response))
}
