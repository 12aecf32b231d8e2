//! PostgreSQL-backed registration store.
//!
//! Reads order by the `seq` column so callers see registrations in the order
//! they were made. Duplicate sign-ups are absorbed by the
//! `(user_id, event_id)` unique constraint.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RegistrationRepository, RegistrationRepositoryError};
use crate::domain::{EventId, Registration, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewRegistrationRow, RegistrationRow};
use super::pool::DbPool;
use super::schema::registrations;

/// Diesel implementation of [`RegistrationRepository`].
#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
}

impl DieselRegistrationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn list_all(&self) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RegistrationRow> = registrations::table
            .order(registrations::seq.asc())
            .select(RegistrationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Registration::from).collect())
    }

    async fn insert_if_absent(
        &self,
        registration: &Registration,
    ) -> Result<bool, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewRegistrationRow {
            user_id: *registration.user_id.as_uuid(),
            event_id: *registration.event_id.as_uuid(),
        };
        let inserted = diesel::insert_into(registrations::table)
            .values(&row)
            .on_conflict((registrations::user_id, registrations::event_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(inserted > 0)
    }

    async fn list_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RegistrationRow> = registrations::table
            .filter(registrations::event_id.eq(event_id.as_uuid()))
            .order(registrations::seq.asc())
            .select(RegistrationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Registration::from).collect())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RegistrationRow> = registrations::table
            .filter(registrations::user_id.eq(user_id.as_uuid()))
            .order(registrations::seq.asc())
            .select(RegistrationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Registration::from).collect())
    }
}
