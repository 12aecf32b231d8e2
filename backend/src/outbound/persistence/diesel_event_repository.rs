//! PostgreSQL-backed event store.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{Event, EventId, NewEvent, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{EventRow, NewEventRow};
use super::pool::DbPool;
use super::schema::events;

/// Diesel implementation of [`EventRepository`].
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn list_upcoming(&self, today: NaiveDate) -> Result<Vec<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventRow> = events::table
            .filter(events::date.ge(today))
            .order((events::date.asc(), events::id.asc()))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn insert(&self, new_event: NewEvent) -> Result<Event, EventRepositoryError> {
        let event = Event::from_new(EventId::random(), new_event);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(events::table)
            .values(NewEventRow::from(&event))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(event)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<EventRow> = events::table
            .find(id.as_uuid())
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Event::from))
    }

    async fn list_by_organizer(
        &self,
        organizer_id: &UserId,
    ) -> Result<Vec<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventRow> = events::table
            .filter(events::organizer_id.eq(organizer_id.as_uuid()))
            .order((events::date.asc(), events::id.asc()))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn find_many(&self, ids: &[EventId]) -> Result<Vec<Event>, EventRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventRow> = events::table
            .filter(events::id.eq_any(uuids))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Event::from).collect())
    }
}
