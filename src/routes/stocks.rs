use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Stock, StockQuery, StockResponse, UpsertStockRequest};
use crate::services::stock_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks).post(create_stock))
        .route("/:id", get(get_stock).put(update_stock).delete(delete_stock))
}

pub async fn list_stocks(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> Result<Json<Vec<StockResponse>>, AppError> {
    info!(
        "GET /api/stocks - Listing stocks (page {}, size {})",
        query.page_number, query.page_size
    );
    let stocks = stock_service::query(&state.pool, query).await.map_err(|e| {
        error!("Failed to list stocks: {}", e);
        e
    })?;
    Ok(Json(stocks))
}

pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StockResponse>, AppError> {
    info!("GET /api/stocks/{} - Fetching stock", id);
    let stock = stock_service::get(&state.pool, id).await.map_err(|e| {
        error!("Failed to fetch stock {}: {}", id, e);
        e
    })?;
    Ok(Json(stock))
}

#[axum::debug_handler]
pub async fn create_stock(
    State(state): State<AppState>,
    Json(payload): Json<UpsertStockRequest>,
) -> Result<Json<Stock>, AppError> {
    info!("POST /api/stocks - Creating stock {}", payload.symbol);
    let stock = stock_service::create(&state.pool, payload)
        .await
        .map_err(|e| {
            error!("Failed to create stock: {}", e);
            e
        })?;
    Ok(Json(stock))
}

pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpsertStockRequest>,
) -> Result<Json<Stock>, AppError> {
    info!("PUT /api/stocks/{} - Updating stock", id);
    let stock = stock_service::update(&state.pool, id, payload)
        .await
        .map_err(|e| {
            error!("Failed to update stock {}: {}", id, e);
            e
        })?;
    Ok(Json(stock))
}

pub async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Stock>, AppError> {
    info!("DELETE /api/stocks/{} - Deleting stock", id);
    let stock = stock_service::delete(&state.pool, id).await.map_err(|e| {
        error!("Failed to delete stock {}: {}", id, e);
        e
    })?;
    Ok(Json(stock))
}
