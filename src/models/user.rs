use sqlx::FromRow;
use uuid::Uuid;

/// Registered account row. Owned by the identity provider; never serialized
/// directly (the password hash stays inside the process).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
}
