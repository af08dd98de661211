//! Bearer-token authentication for the favourites and profile routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use vitrine_core::catalog::User;

use super::jwt::validate_token;
use crate::{AppState, errors::AppError};

/// The authenticated user, inserted into request extensions once the bearer
/// token checks out against a live account.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request)?;

    let claims = validate_token(&token, &state.config.auth.jwt_secret)
        .map_err(|_| {
            AppError::unauthorized(
                "Invalid Token",
                "The provided token is invalid or expired.",
            )
        })?;

    let user = state
        .users
        .find_by_id(claims.sub)
        .await?
        .filter(|user| user.email == claims.email)
        .ok_or_else(|| {
            AppError::unauthorized(
                "Unknown Account",
                "The account this token was issued for no longer exists.",
            )
        })?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> Result<String, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::unauthorized(
                "Authentication Required",
                "This endpoint requires a bearer token.",
            )
        })?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or_else(|| {
            AppError::unauthorized(
                "Authentication Required",
                "Authorization header must use the Bearer scheme.",
            )
        })
}
