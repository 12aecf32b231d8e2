//! Group membership store port.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{Group, GroupId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by group store adapters.
    pub enum GroupRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "group repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "group repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Store a group and enrol its creator in the same step.
    async fn insert(&self, group: &Group) -> Result<(), GroupRepositoryError>;

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, GroupRepositoryError>;

    /// Returns `false` when the user was already a member.
    async fn add_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<bool, GroupRepositoryError>;

    /// Returns `false` when the user was not a member.
    async fn remove_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<bool, GroupRepositoryError>;

    /// Groups the user belongs to.
    async fn groups_for(&self, user_id: &UserId) -> Result<Vec<Group>, GroupRepositoryError>;

    /// Users sharing at least one group with `user_id`, excluding themselves.
    async fn co_members(&self, user_id: &UserId) -> Result<HashSet<UserId>, GroupRepositoryError>;
}
