//! PostgreSQL-backed social graph.
//!
//! Each row of `follows` is one directed edge. Friendships write both
//! directions in a single transaction.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{SocialGraphRepository, SocialGraphRepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::FollowRow;
use super::pool::DbPool;
use super::schema::follows;

/// Diesel implementation of [`SocialGraphRepository`].
#[derive(Clone)]
pub struct DieselSocialGraphRepository {
    pool: DbPool,
}

impl DieselSocialGraphRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn edge(from: &UserId, to: &UserId) -> FollowRow {
    FollowRow {
        follower_id: *from.as_uuid(),
        followed_id: *to.as_uuid(),
    }
}

fn to_ids(uuids: Vec<Uuid>) -> HashSet<UserId> {
    uuids.into_iter().map(UserId::from_uuid).collect()
}

#[async_trait]
impl SocialGraphRepository for DieselSocialGraphRepository {
    async fn outbound_edges(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<UserId>, SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let followed: Vec<Uuid> = follows::table
            .filter(follows::follower_id.eq(user_id.as_uuid()))
            .select(follows::followed_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(to_ids(followed))
    }

    async fn inbound_edges(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<UserId>, SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let followers: Vec<Uuid> = follows::table
            .filter(follows::followed_id.eq(user_id.as_uuid()))
            .select(follows::follower_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(to_ids(followers))
    }

    async fn insert_edge(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<bool, SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(follows::table)
            .values(edge(from, to))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(inserted > 0)
    }

    async fn remove_edge(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<bool, SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(from.as_uuid()))
                .filter(follows::followed_id.eq(to.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn insert_mutual(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<(), SocialGraphRepositoryError> {
        let rows = [edge(a, b), edge(b, a)];
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(follows::table)
                    .values(&rows[..])
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
}
