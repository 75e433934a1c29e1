//! Authentication: password hashing, access tokens, and the auth routes.

mod handlers;
mod jwt;
mod service;

pub use handlers::{login, me, register, LoginRequest, RegisterRequest};
pub use jwt::{Claims, TokenIssuer};
pub use service::{CredentialVerifier, MAX_PASSWORD_BYTES};
