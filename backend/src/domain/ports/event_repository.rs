//! Event store port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Event, EventId, NewEvent, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by event store adapters.
    pub enum EventRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "event repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "event repository query failed: {message}",
    }
}

/// Persistence contract for events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events dated on or after `today`.
    async fn list_upcoming(&self, today: NaiveDate) -> Result<Vec<Event>, EventRepositoryError>;

    /// Store a new event and return it with its assigned id.
    async fn insert(&self, new_event: NewEvent) -> Result<Event, EventRepositoryError>;

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError>;

    async fn list_by_organizer(
        &self,
        organizer_id: &UserId,
    ) -> Result<Vec<Event>, EventRepositoryError>;

    /// Fetch the events whose ids appear in `ids`. Unknown ids are skipped.
    async fn find_many(&self, ids: &[EventId]) -> Result<Vec<Event>, EventRepositoryError>;
}
