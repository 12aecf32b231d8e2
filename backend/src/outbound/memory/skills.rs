//! Per-user skill sets.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{SkillRepository, SkillRepositoryError};
use crate::domain::{SkillSet, UserId};

#[derive(Default)]
pub struct MemorySkillStore {
    pub(super) skills: RwLock<HashMap<UserId, SkillSet>>,
}

impl MemorySkillStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SkillRepository for MemorySkillStore {
    async fn get(&self, user_id: &UserId) -> Result<SkillSet, SkillRepositoryError> {
        let skills = self.skills.read().await;
        Ok(skills.get(user_id).cloned().unwrap_or_default())
    }

    async fn get_many(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, SkillSet>, SkillRepositoryError> {
        let skills = self.skills.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| skills.get(id).map(|set| (*id, set.clone())))
            .collect())
    }

    async fn replace_all(
        &self,
        user_id: &UserId,
        skills: &SkillSet,
    ) -> Result<(), SkillRepositoryError> {
        let mut table = self.skills.write().await;
        if skills.is_empty() {
            table.remove(user_id);
        } else {
            table.insert(*user_id, skills.clone());
        }
        Ok(())
    }
}
