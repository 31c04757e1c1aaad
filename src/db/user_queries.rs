use sqlx::PgPool;

use crate::models::User;

pub async fn get_user_by_username(
    pool: &PgPool,
    user_name: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, user_name, email, password_hash FROM users WHERE user_name = $1",
    )
    .bind(user_name)
    .fetch_optional(pool)
    .await
}

pub async fn insert_user(
    pool: &PgPool,
    user_name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (user_name, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, user_name, email, password_hash
        "#,
    )
    .bind(user_name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}
