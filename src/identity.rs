use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::user_queries;
use crate::errors::{is_unique_violation, AppError};
use crate::models::User;

/// Narrow seam to the identity collaborator. The rest of the core only ever
/// sees this trait, never a concrete provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, user_name: &str, password: &str) -> Result<User, AppError>;
    async fn create_user(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError>;
}

/// Postgres-backed provider; credentials are stored as argon2id hashes.
pub struct PgIdentityProvider {
    pool: PgPool,
}

impl PgIdentityProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn authenticate(&self, user_name: &str, password: &str) -> Result<User, AppError> {
        let user = user_queries::get_user_by_username(&self.pool, user_name)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn create_user(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;

        user_queries::insert_user(&self.pool, user_name, email, &password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("User name is already taken".to_string())
                } else {
                    AppError::Db(e)
                }
            })
    }
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("Str0ng&Secure!pw").unwrap();
        assert!(verify_password("Str0ng&Secure!pw", &hash));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("Str0ng&Secure!pw").unwrap();
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn garbage_stored_hash_does_not_verify() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
