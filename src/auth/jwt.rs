//! Access token issue and validation (HS256, stateless, no revocation).

use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Subject parsed back into a user id.
    pub fn user_id(&self) -> AppResult<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::Jwt(format!("non-numeric subject {:?}", self.sub)))
    }
}

/// Signs and checks access tokens with a server-held secret and a fixed lifetime.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_minutes(secret: &str, minutes: i64) -> Self {
        Self::new(secret, Duration::minutes(minutes))
    }

    /// Mint a token for `subject` expiring `ttl` from now. Extra claims are
    /// merged in, but `sub`, `exp` and `iat` always carry the issuer's values.
    /// Same-named extras are discarded rather than overwriting them.
    pub fn issue(&self, subject: &str, extra: Option<Map<String, Value>>) -> AppResult<String> {
        let now = Utc::now();
        let mut payload = extra.unwrap_or_default();
        payload.insert("sub".to_string(), Value::from(subject));
        payload.insert("exp".to_string(), Value::from((now + self.ttl).timestamp()));
        payload.insert("iat".to_string(), Value::from(now.timestamp()));

        encode(&Header::new(ALGORITHM), &Value::Object(payload), &self.encoding)
            .map_err(|e| AppError::Jwt(e.to_string()))
    }

    /// Decode `token`, failing on a bad signature, malformed input, a missing
    /// `sub`/`exp`, or an `exp` in the past (no leeway).
    pub fn validate(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| AppError::Jwt(e.to_string()))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issue_then_validate_returns_subject() {
        let issuer = TokenIssuer::from_minutes(SECRET, 60);
        let token = issuer.issue("42", None).unwrap();
        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert!(claims.exp > Utc::now().timestamp());
        assert!(claims.exp <= (Utc::now() + Duration::minutes(60)).timestamp());
    }

    #[test]
    fn extra_claims_are_merged_but_cannot_override_subject() {
        let issuer = TokenIssuer::from_minutes(SECRET, 60);
        let mut extra = Map::new();
        extra.insert("user_type".to_string(), Value::from("teacher"));
        extra.insert("sub".to_string(), Value::from("999"));
        let token = issuer.issue("7", Some(extra)).unwrap();
        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.extra.get("user_type"), Some(&Value::from("teacher")));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new(SECRET, Duration::seconds(-5));
        let token = issuer.issue("1", None).unwrap();
        assert!(matches!(issuer.validate(&token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let ours = TokenIssuer::from_minutes(SECRET, 60);
        let theirs = TokenIssuer::from_minutes("another-secret", 60);
        let token = theirs.issue("1", None).unwrap();
        assert!(matches!(ours.validate(&token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let issuer = TokenIssuer::from_minutes(SECRET, 60);
        assert!(issuer.validate("not.a.jwt").is_err());
        assert!(issuer.validate("").is_err());
    }

    #[test]
    fn token_without_subject_is_rejected() {
        let issuer = TokenIssuer::from_minutes(SECRET, 60);
        let payload = serde_json::json!({ "exp": (Utc::now() + Duration::minutes(5)).timestamp() });
        let token = encode(
            &Header::new(ALGORITHM),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(issuer.validate(&token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn non_numeric_subject_is_not_a_user_id() {
        let issuer = TokenIssuer::from_minutes(SECRET, 60);
        let token = issuer.issue("abc", None).unwrap();
        let claims = issuer.validate(&token).unwrap();
        assert!(claims.user_id().is_err());
    }
}
