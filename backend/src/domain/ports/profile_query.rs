//! Driving port for profile reads.

use async_trait::async_trait;

use crate::domain::{Error, Principal, SkillSet, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    async fn profile(&self, principal: &Principal) -> Result<User, Error>;

    async fn skills(&self, principal: &Principal) -> Result<SkillSet, Error>;
}
