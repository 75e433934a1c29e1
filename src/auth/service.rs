//! Password hashing and verification.

use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Largest accepted password, in UTF-8 bytes. Longer inputs are refused
/// rather than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub struct CredentialVerifier;

impl CredentialVerifier {
    /// Hash `password` with a fresh random salt (Argon2id, default cost).
    pub fn hash(password: &str) -> AppResult<String> {
        Self::check_password_length(password)?;
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("hash: {}", e)))?
            .to_string();
        Ok(hash)
    }

    /// Returns false for a wrong password and for a hash that does not parse.
    pub fn verify(password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub fn check_password_length(password: &str) -> AppResult<()> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::Validation(format!(
                "Password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() {
        let hash = CredentialVerifier::hash("mypassword").unwrap();
        assert_ne!(hash, "mypassword");
        assert!(CredentialVerifier::verify("mypassword", &hash));
        assert!(!CredentialVerifier::verify("wrong", &hash));
    }

    #[test]
    fn hashing_is_salted() {
        let a = CredentialVerifier::hash("secret123").unwrap();
        let b = CredentialVerifier::hash("secret123").unwrap();
        assert_ne!(a, b);
        assert!(CredentialVerifier::verify("secret123", &a));
        assert!(CredentialVerifier::verify("secret123", &b));
    }

    #[test]
    fn malformed_hash_does_not_verify() {
        assert!(!CredentialVerifier::verify("secret123", "not-a-hash"));
        assert!(!CredentialVerifier::verify("secret123", ""));
    }

    #[test]
    fn password_byte_limit() {
        let at_limit = "a".repeat(MAX_PASSWORD_BYTES);
        assert!(CredentialVerifier::hash(&at_limit).is_ok());

        let over = "a".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(
            CredentialVerifier::hash(&over),
            Err(AppError::Validation(_))
        ));

        // 25 three-byte chars: 25 chars but 75 bytes.
        let multibyte = "€".repeat(25);
        assert!(CredentialVerifier::check_password_length(&multibyte).is_err());
    }
}
