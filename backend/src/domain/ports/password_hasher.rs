//! Password hashing port.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
        /// The blocking task running the key derivation did not complete.
        Worker { message: String } => "password hashing worker failed: {message}",
    }
}

/// Key derivation is CPU-bound; adapters must not run it on the async
/// executor threads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// `Ok(false)` for a wrong password; errors are reserved for bad hashes.
    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError>;
}
