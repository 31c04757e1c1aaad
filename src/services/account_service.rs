use crate::auth::TokenService;
use crate::errors::AppError;
use crate::identity::IdentityProvider;
use crate::models::{LoginRequest, NewUserResponse, RegisterRequest};
use crate::validation;

pub async fn register(
    identity: &dyn IdentityProvider,
    tokens: &TokenService,
    payload: RegisterRequest,
) -> Result<NewUserResponse, AppError> {
    let errors = validation::validate_registration(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let user = identity
        .create_user(payload.user_name.trim(), &payload.email, &payload.password)
        .await?;
    let token = tokens.issue(&user)?;

    Ok(NewUserResponse {
        user_name: user.user_name,
        email: user.email,
        token,
    })
}

pub async fn login(
    identity: &dyn IdentityProvider,
    tokens: &TokenService,
    payload: LoginRequest,
) -> Result<NewUserResponse, AppError> {
    let user = identity
        .authenticate(&payload.user_name, &payload.password)
        .await?;
    let token = tokens.issue(&user)?;

    Ok(NewUserResponse {
        user_name: user.user_name,
        email: user.email,
        token,
    })
}
