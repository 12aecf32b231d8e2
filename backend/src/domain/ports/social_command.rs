//! Driving port for follow and friendship changes.

use async_trait::async_trait;

use crate::domain::{Error, Principal, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialCommand: Send + Sync {
    /// Follow `target`. Following twice is a no-op.
    async fn follow(&self, principal: &Principal, target: &UserId) -> Result<(), Error>;

    /// Stop following `target`. Unfollowing twice is a no-op.
    async fn unfollow(&self, principal: &Principal, target: &UserId) -> Result<(), Error>;

    /// Create follow edges in both directions.
    async fn befriend(&self, principal: &Principal, target: &UserId) -> Result<(), Error>;
}
