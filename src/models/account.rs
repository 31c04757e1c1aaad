use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Returned by both register and login: the identity plus a fresh token.
#[derive(Debug, Clone, Serialize)]
pub struct NewUserResponse {
    pub user_name: String,
    pub email: String,
    pub token: String,
}
