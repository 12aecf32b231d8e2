//! Event and registration stores.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::ports::{
    EventRepository, EventRepositoryError, RegistrationRepository, RegistrationRepositoryError,
};
use crate::domain::{Event, EventId, NewEvent, Registration, UserId};

#[derive(Default)]
pub struct MemoryEventStore {
    pub(super) events: RwLock<BTreeMap<EventId, Event>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for MemoryEventStore {
    async fn list_upcoming(&self, today: NaiveDate) -> Result<Vec<Event>, EventRepositoryError> {
        let events = self.events.read().await;
        Ok(events
            .values()
            .filter(|event| !event.is_past(today))
            .cloned()
            .collect())
    }

    async fn insert(&self, new_event: NewEvent) -> Result<Event, EventRepositoryError> {
        let event = Event::from_new(EventId::random(), new_event);
        self.events.write().await.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError> {
        Ok(self.events.read().await.get(id).cloned())
    }

    async fn list_by_organizer(
        &self,
        organizer_id: &UserId,
    ) -> Result<Vec<Event>, EventRepositoryError> {
        let events = self.events.read().await;
        Ok(events
            .values()
            .filter(|event| event.organizer_id == *organizer_id)
            .cloned()
            .collect())
    }

    async fn find_many(&self, ids: &[EventId]) -> Result<Vec<Event>, EventRepositoryError> {
        let events = self.events.read().await;
        Ok(ids.iter().filter_map(|id| events.get(id).cloned()).collect())
    }
}

/// Registrations kept in insertion order.
#[derive(Default)]
pub struct MemoryRegistrationStore {
    pub(super) registrations: RwLock<Vec<Registration>>,
}

impl MemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn matching(&self, keep: impl Fn(&Registration) -> bool) -> Vec<Registration> {
        let registrations = self.registrations.read().await;
        registrations.iter().copied().filter(|r| keep(r)).collect()
    }
}

#[async_trait]
impl RegistrationRepository for MemoryRegistrationStore {
    async fn list_all(&self) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        Ok(self.registrations.read().await.clone())
    }

    async fn insert_if_absent(
        &self,
        registration: &Registration,
    ) -> Result<bool, RegistrationRepositoryError> {
        let mut registrations = self.registrations.write().await;
        if registrations.contains(registration) {
            return Ok(false);
        }
        registrations.push(*registration);
        Ok(true)
    }

    async fn list_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        Ok(self.matching(|r| r.event_id == *event_id).await)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        Ok(self.matching(|r| r.user_id == *user_id).await)
    }
}
