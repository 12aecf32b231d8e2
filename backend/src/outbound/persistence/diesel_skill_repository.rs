//! PostgreSQL-backed skill store.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{SkillRepository, SkillRepositoryError};
use crate::domain::{Skill, SkillSet, UserId};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::NewSkillRow;
use super::pool::DbPool;
use super::schema::user_skills;

/// Diesel implementation of [`SkillRepository`].
#[derive(Clone)]
pub struct DieselSkillRepository {
    pool: DbPool,
}

impl DieselSkillRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn group_rows(
    rows: Vec<(Uuid, String)>,
) -> Result<HashMap<UserId, SkillSet>, SkillRepositoryError> {
    let mut grouped: HashMap<UserId, Vec<Skill>> = HashMap::new();
    for (user_id, raw) in rows {
        let skill = Skill::new(&raw)
            .map_err(|err| corrupt_row::<SkillRepositoryError>("user_skills", err.to_string()))?;
        grouped
            .entry(UserId::from_uuid(user_id))
            .or_default()
            .push(skill);
    }
    Ok(grouped
        .into_iter()
        .map(|(user_id, skills)| (user_id, skills.into_iter().collect()))
        .collect())
}

#[async_trait]
impl SkillRepository for DieselSkillRepository {
    async fn get(&self, user_id: &UserId) -> Result<SkillSet, SkillRepositoryError> {
        let mut all = self.get_many(std::slice::from_ref(user_id)).await?;
        Ok(all.remove(user_id).unwrap_or_default())
    }

    async fn get_many(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, SkillSet>, SkillRepositoryError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let uuids: Vec<Uuid> = user_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(Uuid, String)> = user_skills::table
            .filter(user_skills::user_id.eq_any(uuids))
            .select((user_skills::user_id, user_skills::skill))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        group_rows(rows)
    }

    async fn replace_all(
        &self,
        user_id: &UserId,
        skills: &SkillSet,
    ) -> Result<(), SkillRepositoryError> {
        let owner = *user_id.as_uuid();
        let rows: Vec<NewSkillRow<'_>> = skills
            .iter()
            .map(|skill| NewSkillRow {
                user_id: owner,
                skill: skill.as_ref(),
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::delete(user_skills::table.filter(user_skills::user_id.eq(owner)))
                    .execute(conn)
                    .await?;
                if !rows.is_empty() {
                    diesel::insert_into(user_skills::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
