//! # stayhub-auth
//!
//! Authentication primitives for StayHub: HS256 JWT access tokens and
//! Argon2id password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
