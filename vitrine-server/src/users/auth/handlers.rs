//! Signup, login, logout, and profile.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use vitrine_core::catalog::User;

use super::jwt::generate_access_token;
use super::middleware::CurrentUser;
use crate::{
    AppState,
    api::{envelope::Document, serialize},
    errors::{AppError, AppResult},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /signup` — create an account and issue a bearer token.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<Json<Document>> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::bad_request(
            "email and password must not be empty",
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(request.password.as_bytes(), &salt)
        .map_err(|_| AppError::internal("failed to hash password"))?
        .to_string();

    let user = User {
        id: Uuid::new_v4(),
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        password_hash,
        administrator: false,
    };

    state.users.create(&user).await?;
    info!(user = %user.id, "account created");

    let token = issue_token(&state, &user)?;
    Ok(Json(serialize::user_document(&user, Some(token))))
}

/// `POST /login` — verify credentials and issue a bearer token. The error
/// object names the offending parameter so the client can highlight it.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<Document>> {
    let user = state
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| {
            AppError::unauthorized(
                "Account Not Found",
                "No account exists associated with that email.",
            )
            .with_source_parameter("email")
        })?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::internal("stored password hash is invalid"))?;
    Argon2::default()
        .verify_password(request.password.as_bytes(), &parsed_hash)
        .map_err(|_| {
            AppError::unauthorized(
                "Incorrect Password",
                "The password provided was incorrect.",
            )
            .with_source_parameter("password")
        })?;

    let token = issue_token(&state, &user)?;
    Ok(Json(serialize::user_document(&user, Some(token))))
}

/// `POST /logout` — bearer tokens are dropped client-side; the endpoint
/// exists so clients have a uniform sign-out call.
pub async fn logout(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> StatusCode {
    info!(user = %user.id, "logout");
    StatusCode::OK
}

/// `GET /profile` — the current account.
pub async fn profile(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<Document> {
    Json(serialize::user_document(&user, None))
}

fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    generate_access_token(
        user.id,
        &user.email,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_secs,
    )
    .map_err(|_| AppError::internal("failed to generate access token"))
}
