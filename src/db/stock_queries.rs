use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Stock, UpsertStockRequest};

/// Filtered, paginated catalog listing. Patterns arrive pre-escaped from the
/// service so user input always matches literally; matching is
/// case-insensitive substring (ILIKE). The ordering is total (symbol, then
/// id) so pages partition the result set deterministically.
pub async fn query_stocks(
    pool: &PgPool,
    symbol_contains: Option<&str>,
    company_name_contains: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Stock>, sqlx::Error> {
    let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT id, symbol, company_name, price, divs, industry, market_cap \
         FROM stocks WHERE 1 = 1",
    );

    if let Some(pattern) = symbol_contains {
        query_builder.push(" AND symbol ILIKE ");
        query_builder.push_bind(format!("%{pattern}%"));
    }
    if let Some(pattern) = company_name_contains {
        query_builder.push(" AND company_name ILIKE ");
        query_builder.push_bind(format!("%{pattern}%"));
    }

    query_builder.push(" ORDER BY symbol ASC, id ASC LIMIT ");
    query_builder.push_bind(limit);
    query_builder.push(" OFFSET ");
    query_builder.push_bind(offset);

    query_builder
        .build_query_as::<Stock>()
        .fetch_all(pool)
        .await
}

pub async fn get_stock(pool: &PgPool, id: Uuid) -> Result<Option<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        "SELECT id, symbol, company_name, price, divs, industry, market_cap \
         FROM stocks WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Case-insensitive exact match on the symbol; serves the portfolio add
/// flow. Symbols are not unique, ties break by lowest id.
pub async fn get_stock_by_symbol(
    pool: &PgPool,
    symbol: &str,
) -> Result<Option<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        r#"
        SELECT id, symbol, company_name, price, divs, industry, market_cap
        FROM stocks
        WHERE LOWER(symbol) = LOWER($1)
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .bind(symbol)
    .fetch_optional(pool)
    .await
}

pub async fn insert_stock(
    pool: &PgPool,
    payload: &UpsertStockRequest,
) -> Result<Stock, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        r#"
        INSERT INTO stocks (symbol, company_name, price, divs, industry, market_cap)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, symbol, company_name, price, divs, industry, market_cap
        "#,
    )
    .bind(&payload.symbol)
    .bind(&payload.company_name)
    .bind(&payload.price)
    .bind(&payload.divs)
    .bind(&payload.industry)
    .bind(payload.market_cap)
    .fetch_one(pool)
    .await
}

/// Full-field replace; there is no partial merge.
pub async fn update_stock(
    pool: &PgPool,
    id: Uuid,
    payload: &UpsertStockRequest,
) -> Result<Option<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        r#"
        UPDATE stocks
        SET symbol = $2, company_name = $3, price = $4, divs = $5, industry = $6, market_cap = $7
        WHERE id = $1
        RETURNING id, symbol, company_name, price, divs, industry, market_cap
        "#,
    )
    .bind(id)
    .bind(&payload.symbol)
    .bind(&payload.company_name)
    .bind(&payload.price)
    .bind(&payload.divs)
    .bind(&payload.industry)
    .bind(payload.market_cap)
    .fetch_optional(pool)
    .await
}

/// Dependent comments and portfolio rows go with the stock (schema-level
/// cascade).
pub async fn delete_stock(pool: &PgPool, id: Uuid) -> Result<Option<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        r#"
        DELETE FROM stocks
        WHERE id = $1
        RETURNING id, symbol, company_name, price, divs, industry, market_cap
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn stock_exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM stocks WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}
