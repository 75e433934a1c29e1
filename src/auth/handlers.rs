//! Auth HTTP handlers: register, login, current user.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{debug, info};
use validator::Validate;

use crate::auth::CredentialVerifier;
use crate::db::{user_create, user_find_by_email, user_get_by_id, NewUser};
use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::auth::AuthUser;
use crate::models::{TokenResponse, UserProfile};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1))]
    pub user_type: String,
    #[serde(default)]
    pub institution: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    CredentialVerifier::check_password_length(&body.password)?;
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    if user_find_by_email(state.db(), &body.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = CredentialVerifier::hash(&body.password)?;
    let user_id = user_create(
        state.db(),
        NewUser {
            name: &body.name,
            email: &body.email,
            password_hash: &password_hash,
            user_type: &body.user_type,
            institution: body.institution.as_deref(),
        },
    )
    .await?;
    let token = state.token_issuer().issue(&user_id.to_string(), None)?;

    info!(user_id, "user registered");
    Ok(Json(TokenResponse::bearer(token)))
}

/// POST /auth/login
///
/// Unknown email and wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let user = match user_find_by_email(state.db(), &body.email).await? {
        Some(user) => user,
        None => {
            debug!("login rejected: unknown email");
            return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
        }
    };

    if !CredentialVerifier::verify(&body.password, &user.password_hash) {
        debug!(user_id = user.id, "login rejected: wrong password");
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let token = state.token_issuer().issue(&user.id.to_string(), None)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(TokenResponse::bearer(token)))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    let user = user_get_by_id(state.db(), user_id)
        .await?
        .ok_or_else(|| {
            debug!(user_id, "token subject has no user");
            AppError::Auth("User not found".to_string())
        })?;
    Ok(Json(UserProfile::from(user)))
}
