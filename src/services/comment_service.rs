use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_queries, stock_queries};
use crate::errors::AppError;
use crate::models::{Comment, CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::validation::{self, FieldError};

pub async fn list(pool: &PgPool) -> Result<Vec<CommentResponse>, AppError> {
    let comments = comment_queries::list_comments(pool).await?;
    Ok(comments)
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<CommentResponse, AppError> {
    comment_queries::get_comment(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment"))
}

/// The author comes from the verified token, never from the payload, and is
/// fixed for the comment's lifetime. Stock existence is re-checked at the
/// store boundary so an orphaned insert cannot slip through.
pub async fn create(
    pool: &PgPool,
    stock_id: Uuid,
    author_id: Uuid,
    author_name: &str,
    payload: CreateCommentRequest,
) -> Result<CommentResponse, AppError> {
    let mut errors = validation::validate_comment(&payload.title, &payload.content);
    if !stock_queries::stock_exists(pool, stock_id).await? {
        errors.push(FieldError::new("stock_id", "stock does not exist"));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let comment =
        comment_queries::insert_comment(pool, stock_id, author_id, &payload.title, &payload.content)
            .await?;
    Ok(CommentResponse::from_comment(comment, author_name.to_string()))
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    payload: UpdateCommentRequest,
) -> Result<CommentResponse, AppError> {
    let errors = validation::validate_comment(&payload.title, &payload.content);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    comment_queries::update_comment(pool, id, &payload.title, &payload.content)
        .await?
        .ok_or_else(|| AppError::not_found("Comment"))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Comment, AppError> {
    comment_queries::delete_comment(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment"))
}
