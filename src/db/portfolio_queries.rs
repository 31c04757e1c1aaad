use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{PortfolioMembership, Stock};

/// The user's tracked stocks, projected through the membership rows. The
/// projection carries no comments.
pub async fn get_user_portfolio(pool: &PgPool, user_id: Uuid) -> Result<Vec<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        r#"
        SELECT s.id, s.symbol, s.company_name, s.price, s.divs, s.industry, s.market_cap
        FROM portfolios p
        JOIN stocks s ON s.id = p.stock_id
        WHERE p.user_id = $1
        ORDER BY s.symbol ASC, s.id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// A duplicate (user, stock) pair violates the composite primary key and
/// surfaces as a database error for the service to map.
pub async fn insert_membership(
    pool: &PgPool,
    user_id: Uuid,
    stock_id: Uuid,
) -> Result<PortfolioMembership, sqlx::Error> {
    sqlx::query_as::<_, PortfolioMembership>(
        r#"
        INSERT INTO portfolios (user_id, stock_id)
        VALUES ($1, $2)
        RETURNING user_id, stock_id, added_at
        "#,
    )
    .bind(user_id)
    .bind(stock_id)
    .fetch_one(pool)
    .await
}

/// Memberships whose stock symbol matches case-insensitively. The uniqueness
/// invariant makes more than one row an internal inconsistency, which the
/// service checks for.
pub async fn find_memberships_by_symbol(
    pool: &PgPool,
    user_id: Uuid,
    symbol: &str,
) -> Result<Vec<PortfolioMembership>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioMembership>(
        r#"
        SELECT p.user_id, p.stock_id, p.added_at
        FROM portfolios p
        JOIN stocks s ON s.id = p.stock_id
        WHERE p.user_id = $1 AND LOWER(s.symbol) = LOWER($2)
        "#,
    )
    .bind(user_id)
    .bind(symbol)
    .fetch_all(pool)
    .await
}

pub async fn delete_membership(
    pool: &PgPool,
    user_id: Uuid,
    stock_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM portfolios WHERE user_id = $1 AND stock_id = $2")
        .bind(user_id)
        .bind(stock_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
