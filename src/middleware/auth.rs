//! Bearer token extractor.

use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;

const BEARER_SCHEME: &str = "bearer";

/// Extractor: authenticated user id taken from a valid `Authorization: Bearer` token.
///
/// Only proves the token is genuine and unexpired; the handler still has to
/// look the user up, since tokens outlive deleted or missing rows.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub i64);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            debug!("rejected request: missing or malformed Authorization header");
            AppError::Auth("Not authenticated".to_string())
        })?;
        let claims = state.token_issuer().validate(token)?;
        let user_id = claims.user_id()?;
        Ok(AuthUser(user_id))
    }
}

/// Token from `Authorization: Bearer <token>`; scheme match is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() {
        return None;
    }
    Some(token)
}
