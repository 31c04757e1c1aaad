use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    // Nullable: the comment outlives detachment from a stock.
    pub stock_id: Option<Uuid>,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub title: String,
    pub content: String,
}

/// Only title and content are mutable; creation time and author are fixed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCommentRequest {
    pub title: String,
    pub content: String,
}

/// Comment joined with its author's display name, as served to callers.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub stock_id: Option<Uuid>,
    pub created_by: String,
}

impl CommentResponse {
    pub fn from_comment(comment: Comment, created_by: String) -> Self {
        Self {
            id: comment.id,
            title: comment.title,
            content: comment.content,
            created_at: comment.created_at,
            stock_id: comment.stock_id,
            created_by,
        }
    }
}
