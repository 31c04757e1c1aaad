use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_queries, stock_queries};
use crate::errors::AppError;
use crate::models::{Stock, StockQuery, StockResponse, UpsertStockRequest};
use crate::validation;

/// Filtered, paginated catalog listing. Every returned stock carries its
/// comments (author names resolved), fetched for the whole page at once.
pub async fn query(pool: &PgPool, query: StockQuery) -> Result<Vec<StockResponse>, AppError> {
    let errors = validation::validate_page(query.page_number, query.page_size);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let symbol_filter = query
        .symbol
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(escape_like);
    let company_filter = query
        .company_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(escape_like);

    let stocks = stock_queries::query_stocks(
        pool,
        symbol_filter.as_deref(),
        company_filter.as_deref(),
        query.page_size,
        page_offset(query.page_number, query.page_size),
    )
    .await?;

    attach_comments(pool, stocks).await
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<StockResponse, AppError> {
    let stock = stock_queries::get_stock(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Stock"))?;

    let mut responses = attach_comments(pool, vec![stock]).await?;
    Ok(responses.remove(0))
}

pub async fn create(pool: &PgPool, payload: UpsertStockRequest) -> Result<Stock, AppError> {
    let errors = validation::validate_stock(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let stock = stock_queries::insert_stock(pool, &payload).await?;
    Ok(stock)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    payload: UpsertStockRequest,
) -> Result<Stock, AppError> {
    let errors = validation::validate_stock(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let stock = stock_queries::update_stock(pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::not_found("Stock"))?;
    Ok(stock)
}

/// Returns the deleted row. Dependent comments and portfolio memberships are
/// removed with it by the schema's cascade.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Stock, AppError> {
    let stock = stock_queries::delete_stock(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Stock"))?;
    Ok(stock)
}

async fn attach_comments(
    pool: &PgPool,
    stocks: Vec<Stock>,
) -> Result<Vec<StockResponse>, AppError> {
    let ids: Vec<Uuid> = stocks.iter().map(|s| s.id).collect();
    let mut by_stock = comment_queries::get_comments_for_stocks(pool, &ids).await?;

    Ok(stocks
        .into_iter()
        .map(|stock| {
            let comments = by_stock.remove(&stock.id).unwrap_or_default();
            StockResponse::new(stock, comments)
        })
        .collect())
}

fn page_offset(page_number: i64, page_size: i64) -> i64 {
    (page_number - 1) * page_size
}

/// ILIKE treats %, _ and \ specially; escape them so filters always match
/// the caller's text literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_offset(1, 20), 0);
    }

    #[test]
    fn later_pages_skip_whole_pages() {
        assert_eq!(page_offset(3, 20), 40);
        assert_eq!(page_offset(2, 7), 7);
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_like("AAPL"), "AAPL");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like("100%_a"), "100\\%\\_a");
    }

    #[test]
    fn backslash_is_escaped_first() {
        // A literal backslash must not end up re-escaping the added ones.
        assert_eq!(escape_like("a\\%"), "a\\\\\\%");
    }
}
