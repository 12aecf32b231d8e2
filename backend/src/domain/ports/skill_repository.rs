//! Skill store port.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{SkillSet, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by skill store adapters.
    pub enum SkillRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "skill repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "skill repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Skills of one user; empty when none were recorded.
    async fn get(&self, user_id: &UserId) -> Result<SkillSet, SkillRepositoryError>;

    /// Skills for several users. Users without skills may be absent.
    async fn get_many(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, SkillSet>, SkillRepositoryError>;

    /// Replace the user's skills in one step.
    async fn replace_all(
        &self,
        user_id: &UserId,
        skills: &SkillSet,
    ) -> Result<(), SkillRepositoryError>;
}
