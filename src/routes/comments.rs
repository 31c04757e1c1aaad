use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{Comment, CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::services::comment_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_comments)).route(
        "/:id",
        // POST takes the path id as the stock to comment on; the other
        // verbs take it as the comment id.
        get(get_comment)
            .post(create_comment)
            .put(update_comment)
            .delete(delete_comment),
    )
}

pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    info!("GET /api/comments - Listing comments");
    let comments = comment_service::list(&state.pool).await.map_err(|e| {
        error!("Failed to list comments: {}", e);
        e
    })?;
    Ok(Json(comments))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CommentResponse>, AppError> {
    info!("GET /api/comments/{} - Fetching comment", id);
    let comment = comment_service::get(&state.pool, id).await.map_err(|e| {
        error!("Failed to fetch comment {}: {}", id, e);
        e
    })?;
    Ok(Json(comment))
}

pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(stock_id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    info!(
        "POST /api/comments/{} - Creating comment by {}",
        stock_id, user.username
    );
    let comment =
        comment_service::create(&state.pool, stock_id, user.id, &user.username, payload)
            .await
            .map_err(|e| {
                error!("Failed to create comment on stock {}: {}", stock_id, e);
                e
            })?;
    Ok(Json(comment))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    info!("PUT /api/comments/{} - Updating comment", id);
    let comment = comment_service::update(&state.pool, id, payload)
        .await
        .map_err(|e| {
            error!("Failed to update comment {}: {}", id, e);
            e
        })?;
    Ok(Json(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Comment>, AppError> {
    info!("DELETE /api/comments/{} - Deleting comment", id);
    let comment = comment_service::delete(&state.pool, id).await.map_err(|e| {
        error!("Failed to delete comment {}: {}", id, e);
        e
    })?;
    Ok(Json(comment))
}
