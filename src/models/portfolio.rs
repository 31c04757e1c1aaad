use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Membership row keyed by the (user, stock) pair; there is no surrogate id.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PortfolioMembership {
    pub user_id: Uuid,
    pub stock_id: Uuid,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddPortfolioRequest {
    pub symbol: String,
}
