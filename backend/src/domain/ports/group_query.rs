//! Driving port for group reads.

use async_trait::async_trait;

use crate::domain::{Error, Group, Principal};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupQuery: Send + Sync {
    /// Groups the caller belongs to, by name.
    async fn my_groups(&self, principal: &Principal) -> Result<Vec<Group>, Error>;
}
