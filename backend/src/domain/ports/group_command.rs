//! Driving port for group membership changes.

use async_trait::async_trait;

use crate::domain::{Error, Group, GroupId, GroupName, Principal};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupCommand: Send + Sync {
    /// Create a group with the caller as its first member.
    async fn create_group(&self, principal: &Principal, name: GroupName) -> Result<Group, Error>;

    /// Join a group. Joining twice is a no-op.
    async fn join_group(&self, principal: &Principal, group_id: &GroupId) -> Result<(), Error>;

    /// Leave a group. Leaving twice is a no-op.
    async fn leave_group(&self, principal: &Principal, group_id: &GroupId) -> Result<(), Error>;
}
