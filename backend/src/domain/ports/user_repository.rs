//! Identity store port.

use async_trait::async_trait;

use crate::domain::{Email, PasswordHash, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity store adapters.
    pub enum UserRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Stored account together with its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: PasswordHash,
}

/// Persistence contract for user accounts.
///
/// Emails are unique. `insert` reports a clash with
/// [`UserRepositoryError::DuplicateEmail`] rather than overwriting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new account.
    async fn insert(&self, user: &User, password_hash: &PasswordHash)
        -> Result<(), UserRepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch the users whose ids appear in `ids`. Unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError>;

    /// Look up an account and its hash for login.
    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError>;

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Persist the mutable profile fields (display name and image).
    ///
    /// Returns `false` when the account does not exist.
    async fn update_profile(&self, user: &User) -> Result<bool, UserRepositoryError>;
}
