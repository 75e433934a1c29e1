//! Outward-facing response models.

pub mod user;

pub use user::*;
