//! Driving port for event reads.

use async_trait::async_trait;

use crate::domain::{AnnotatedEvent, Error, Event, EventId, Principal, VolunteerProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventQuery: Send + Sync {
    /// Ranked upcoming events for the caller.
    async fn feed(&self, principal: &Principal) -> Result<Vec<AnnotatedEvent>, Error>;

    /// Events the calling organizer published, by date.
    async fn organizer_events(&self, principal: &Principal) -> Result<Vec<Event>, Error>;

    /// Events the caller registered for, by date.
    async fn volunteer_events(&self, principal: &Principal) -> Result<Vec<Event>, Error>;

    /// Volunteers registered for an event the caller owns.
    async fn roster(
        &self,
        principal: &Principal,
        event_id: &EventId,
    ) -> Result<Vec<VolunteerProfile>, Error>;
}
