//! PostgreSQL-backed groups and memberships.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{GroupRepository, GroupRepositoryError};
use crate::domain::{Group, GroupId, UserId};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{GroupRow, MembershipRow, NewGroupRow};
use super::pool::DbPool;
use super::schema::{group_members, groups};

/// Distinct users sharing at least one group with `$user`.
///
/// `group_members` is joined to itself, so both sides are aliased.
macro_rules! co_members_query {
    ($user:expr) => {{
        let user: Uuid = $user;
        let (member, mine) = diesel::alias!(group_members as member, group_members as mine);
        member
            .inner_join(
                mine.on(mine
                    .field(group_members::group_id)
                    .eq(member.field(group_members::group_id))),
            )
            .filter(mine.field(group_members::user_id).eq(user))
            .filter(member.field(group_members::user_id).ne(user))
            .select(member.field(group_members::user_id))
            .distinct()
    }};
}

/// Diesel implementation of [`GroupRepository`].
#[derive(Clone)]
pub struct DieselGroupRepository {
    pool: DbPool,
}

impl DieselGroupRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_group(row: GroupRow) -> Result<Group, GroupRepositoryError> {
    row.into_group().map_err(|reason| corrupt_row("groups", reason))
}

fn membership(group_id: &GroupId, user_id: &UserId) -> MembershipRow {
    MembershipRow {
        group_id: *group_id.as_uuid(),
        user_id: *user_id.as_uuid(),
    }
}

#[async_trait]
impl GroupRepository for DieselGroupRepository {
    async fn insert(&self, group: &Group) -> Result<(), GroupRepositoryError> {
        let row = NewGroupRow {
            id: *group.id.as_uuid(),
            name: group.name.as_ref(),
            created_by: *group.created_by.as_uuid(),
        };
        let creator = membership(&group.id, &group.created_by);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(groups::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(group_members::table)
                    .values(creator)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, GroupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        groups::table
            .find(id.as_uuid())
            .select(GroupRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_group)
            .transpose()
    }

    async fn add_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<bool, GroupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(group_members::table)
            .values(membership(group_id, user_id))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(inserted > 0)
    }

    async fn remove_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<bool, GroupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            group_members::table
                .filter(group_members::group_id.eq(group_id.as_uuid()))
                .filter(group_members::user_id.eq(user_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn groups_for(&self, user_id: &UserId) -> Result<Vec<Group>, GroupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GroupRow> = groups::table
            .inner_join(group_members::table)
            .filter(group_members::user_id.eq(user_id.as_uuid()))
            .select(GroupRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_group).collect()
    }

    async fn co_members(&self, user_id: &UserId) -> Result<HashSet<UserId>, GroupRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let others: Vec<Uuid> = co_members_query!(*user_id.as_uuid())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(others.into_iter().map(UserId::from_uuid).collect())
    }
}
