use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::CommentResponse;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stock {
    pub id: Uuid,
    pub symbol: String,
    pub company_name: String,
    pub price: BigDecimal,
    pub divs: BigDecimal,
    pub industry: String,
    pub market_cap: i64,
}

/// Create and update share one shape: updates replace every mutable field,
/// there is no partial merge.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertStockRequest {
    pub symbol: String,
    pub company_name: String,
    pub price: BigDecimal,
    pub divs: BigDecimal,
    pub industry: String,
    pub market_cap: i64,
}

/// Catalog listing filter and page, bound from query string parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct StockQuery {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

/// Stock with its comments resolved in the same round trip.
#[derive(Debug, Serialize)]
pub struct StockResponse {
    pub id: Uuid,
    pub symbol: String,
    pub company_name: String,
    pub price: BigDecimal,
    pub divs: BigDecimal,
    pub industry: String,
    pub market_cap: i64,
    pub comments: Vec<CommentResponse>,
}

impl StockResponse {
    pub fn new(stock: Stock, comments: Vec<CommentResponse>) -> Self {
        Self {
            id: stock.id,
            symbol: stock.symbol,
            company_name: stock.company_name,
            price: stock.price,
            divs: stock.divs,
            industry: stock.industry,
            market_cap: stock.market_cap,
            comments,
        }
    }
}
