use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Comment, CommentResponse};

pub async fn list_comments(pool: &PgPool) -> Result<Vec<CommentResponse>, sqlx::Error> {
    sqlx::query_as::<_, CommentResponse>(
        r#"
        SELECT c.id, c.title, c.content, c.created_at, c.stock_id, u.user_name AS created_by
        FROM comments c
        JOIN users u ON u.id = c.author_id
        ORDER BY c.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_comment(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CommentResponse>, sqlx::Error> {
    sqlx::query_as::<_, CommentResponse>(
        r#"
        SELECT c.id, c.title, c.content, c.created_at, c.stock_id, u.user_name AS created_by
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Comments for a whole page of stocks in one round trip, grouped by stock.
/// Within a stock, comments come back in creation order.
pub async fn get_comments_for_stocks(
    pool: &PgPool,
    stock_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<CommentResponse>>, sqlx::Error> {
    if stock_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let comments = sqlx::query_as::<_, CommentResponse>(
        r#"
        SELECT c.id, c.title, c.content, c.created_at, c.stock_id, u.user_name AS created_by
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.stock_id = ANY($1)
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(stock_ids)
    .fetch_all(pool)
    .await?;

    let mut map: HashMap<Uuid, Vec<CommentResponse>> = HashMap::new();
    for comment in comments {
        if let Some(stock_id) = comment.stock_id {
            map.entry(stock_id).or_default().push(comment);
        }
    }

    Ok(map)
}

pub async fn insert_comment(
    pool: &PgPool,
    stock_id: Uuid,
    author_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (title, content, stock_id, author_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, content, created_at, stock_id, author_id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(stock_id)
    .bind(author_id)
    .fetch_one(pool)
    .await
}

/// Title and content only; created_at and author_id are never touched.
pub async fn update_comment(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    content: &str,
) -> Result<Option<CommentResponse>, sqlx::Error> {
    sqlx::query_as::<_, CommentResponse>(
        r#"
        UPDATE comments c
        SET title = $2, content = $3
        FROM users u
        WHERE c.id = $1 AND u.id = c.author_id
        RETURNING c.id, c.title, c.content, c.created_at, c.stock_id, u.user_name AS created_by
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .fetch_optional(pool)
    .await
}

pub async fn delete_comment(pool: &PgPool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        DELETE FROM comments
        WHERE id = $1
        RETURNING id, title, content, created_at, stock_id, author_id
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
