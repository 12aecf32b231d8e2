//! Bearer token issuance and verification port.

use crate::domain::{IssuedToken, Principal, Role, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum AuthServiceError {
        /// Token could not be decoded or its signature did not match.
        Invalid { message: String } => "invalid token: {message}",
        /// Token expiry has passed.
        Expired => "token expired",
        /// Signing a new token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues and checks opaque bearer tokens.
///
/// Callers trust the principal returned by `verify` without further lookups.
#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    fn issue(&self, user_id: &UserId, role: Role) -> Result<IssuedToken, AuthServiceError>;

    fn verify(&self, token: &str) -> Result<Principal, AuthServiceError>;
}
