//! Driving port for social reads.

use async_trait::async_trait;

use crate::domain::{Candidate, Error, Principal, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialQuery: Send + Sync {
    /// People the caller might follow, optionally filtered by `search`.
    async fn directory(
        &self,
        principal: &Principal,
        search: Option<String>,
    ) -> Result<Vec<Candidate>, Error>;

    /// Users the caller follows, by display name.
    async fn following(&self, principal: &Principal) -> Result<Vec<User>, Error>;

    /// Users following the caller, by display name.
    async fn followers(&self, principal: &Principal) -> Result<Vec<User>, Error>;
}
