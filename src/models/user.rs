//! Profile and token responses.

use serde::Serialize;

use crate::db::UserRow;

/// Public view of a user. Built only from [`UserRow`] and has no
/// password hash field to leak.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub user_type: String,
    pub institution: Option<String>,
    pub created_at: String,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            user_type: row.user_type,
            institution: row.institution,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn profile_omits_password_hash() {
        let row = UserRow {
            id: 3,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            user_type: "student".to_string(),
            institution: Some("UNAL".to_string()),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(UserProfile::from(row)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["id"], 3);
        assert_eq!(json["institution"], "UNAL");
        assert!(!json.to_string().contains("$argon2id$secret"));
    }

    #[test]
    fn token_response_is_bearer() {
        let json = serde_json::to_value(TokenResponse::bearer("abc".to_string())).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }
}
