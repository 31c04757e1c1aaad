use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{portfolio_queries, stock_queries};
use crate::errors::{is_unique_violation, AppError};
use crate::models::{PortfolioMembership, Stock};

pub async fn get_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Stock>, AppError> {
    let stocks = portfolio_queries::get_user_portfolio(pool, user_id).await?;
    Ok(stocks)
}

/// Symbol resolution is case-insensitive. The duplicate check here gives a
/// clean conflict message; the composite primary key backs it up against
/// concurrent adds, and that store-side rejection maps to the same conflict.
pub async fn add(
    pool: &PgPool,
    user_id: Uuid,
    symbol: &str,
) -> Result<PortfolioMembership, AppError> {
    let stock = stock_queries::get_stock_by_symbol(pool, symbol)
        .await?
        .ok_or_else(|| AppError::not_found("Stock"))?;

    let existing = portfolio_queries::find_memberships_by_symbol(pool, user_id, symbol).await?;
    if !existing.is_empty() {
        return Err(AppError::Conflict("Stock already in portfolio".to_string()));
    }

    portfolio_queries::insert_membership(pool, user_id, stock.id)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Stock already in portfolio".to_string())
            } else {
                AppError::Db(e)
            }
        })
}

/// Exactly one membership may match the symbol. Zero is a normal not-found;
/// more than one breaks the (user, stock) uniqueness invariant and is
/// reported as an internal inconsistency rather than silently resolved.
pub async fn remove(pool: &PgPool, user_id: Uuid, symbol: &str) -> Result<(), AppError> {
    let matches = portfolio_queries::find_memberships_by_symbol(pool, user_id, symbol).await?;

    let membership = match matches.as_slice() {
        [] => return Err(AppError::NotFound("Stock not in your portfolio".to_string())),
        [membership] => membership,
        _ => {
            return Err(AppError::Internal(format!(
                "portfolio holds {} memberships for symbol {symbol}",
                matches.len()
            )))
        }
    };

    let deleted =
        portfolio_queries::delete_membership(pool, user_id, membership.stock_id).await?;
    if deleted == 0 {
        // Removed concurrently between the lookup and the delete.
        return Err(AppError::NotFound("Stock not in your portfolio".to_string()));
    }

    Ok(())
}
