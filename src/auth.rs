use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::errors::AppError;
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
}

const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Stateless issuer/verifier over a process-wide symmetric key. There is no
/// revocation list; tokens stay valid until natural expiry.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);

        Self {
            encoding_key: EncodingKey::from_secret(config.signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.signing_key.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        self.issue_with_expiry(user, Utc::now() + Duration::days(TOKEN_LIFETIME_DAYS))
    }

    fn issue_with_expiry(
        &self,
        user: &User,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user.id,
            username: user.user_name.clone(),
            email: user.email.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))
    }

    /// Signature, issuer, audience and expiry all have to check out; any
    /// mismatch is an authentication failure, never a panic.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthenticated)
    }
}

/// The identity resolved from the bearer token. Handlers take this instead
/// of trusting any caller-supplied user id.
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthenticated)?;

        let claims = state.tokens.verify(token)?;

        Ok(AuthUser {
            id: claims.sub,
            username: claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config(key: &str, issuer: &str, audience: &str) -> JwtConfig {
        JwtConfig {
            signing_key: key.to_string(),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            user_name: "investor1".to_string(),
            email: "investor@example.com".to_string(),
            password_hash: String::new(),
        }
    }

    fn test_service() -> TokenService {
        let key = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
        TokenService::new(&jwt_config(key, "stockboard", "stockboard"))
    }

    #[test]
    fn issued_token_resolves_to_the_same_identity() {
        let service = test_service();
        let user = test_user();

        let token = service.issue(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, user.user_name);
        assert_eq!(claims.email, user.email);
    }

    #[test]
    fn token_signed_with_another_key_fails() {
        let service = test_service();
        let other = TokenService::new(&jwt_config(
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            "stockboard",
            "stockboard",
        ));

        let token = other.issue(&test_user()).unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn tampered_token_fails() {
        let service = test_service();
        let token = service.issue(&test_user()).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('x');
        assert!(service.verify(&tampered).is_err());
    }

    #[test]
    fn expired_token_fails() {
        let service = test_service();
        let token = service
            .issue_with_expiry(&test_user(), Utc::now() - Duration::hours(1))
            .unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn wrong_audience_fails() {
        let key = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
        let issuer_service = TokenService::new(&jwt_config(key, "stockboard", "other-api"));

        let token = issuer_service.issue(&test_user()).unwrap();
        assert!(test_service().verify(&token).is_err());
    }

    #[test]
    fn wrong_issuer_fails() {
        let key = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
        let issuer_service = TokenService::new(&jwt_config(key, "someone-else", "stockboard"));

        let token = issuer_service.issue(&test_user()).unwrap();
        assert!(test_service().verify(&token).is_err());
    }
}
