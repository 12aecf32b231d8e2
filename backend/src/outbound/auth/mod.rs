//! Credential adapters: HS256 bearer tokens and Argon2id password hashes.

mod argon;
mod jwt;

pub use argon::Argon2PasswordHasher;
pub use jwt::JwtAuthService;
