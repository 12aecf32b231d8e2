//! Driving port for account registration and login.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, LoginCredentials, SignUp, User};

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    pub token: IssuedToken,
    pub user: User,
}

/// Account lifecycle operations used by the HTTP adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account. A taken email yields a conflict.
    async fn register(&self, form: SignUp) -> Result<User, Error>;

    /// Check credentials and mint a bearer token.
    ///
    /// Unknown emails and wrong passwords both produce the same unauthorized
    /// error.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginSession, Error>;
}
