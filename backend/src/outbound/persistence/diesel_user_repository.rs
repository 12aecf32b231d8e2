//! PostgreSQL-backed identity store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{StoredCredentials, UserRepository, UserRepositoryError};
use crate::domain::{Email, PasswordHash, User, UserId};

use super::error_mapping::{corrupt_row, is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, ProfileChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    row.into_user().map_err(|reason| corrupt_row("users", reason))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            password_hash: password_hash.as_ref(),
            display_name: user.display_name().as_ref(),
            role: user.role().as_str(),
            profile_image_url: user.profile_image_url(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserRepositoryError::duplicate_email(user.email().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_user)
            .transpose()
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(uuids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_user).collect()
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| {
            let (user, password_hash) = row
                .into_credentials()
                .map_err(|reason| corrupt_row::<UserRepositoryError>("users", reason))?;
            Ok(StoredCredentials {
                user,
                password_hash,
            })
        })
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_user).collect()
    }

    async fn update_profile(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ProfileChangeset {
            display_name: user.display_name().as_ref(),
            profile_image_url: user.profile_image_url(),
        };
        let updated = diesel::update(users::table.find(user.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }
}
