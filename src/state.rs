use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenService;
use crate::identity::IdentityProvider;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenService,
    pub identity: Arc<dyn IdentityProvider>,
}
