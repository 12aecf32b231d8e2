//! Driving port for event mutations.

use async_trait::async_trait;

use crate::domain::{Error, Event, EventDraft, EventId, ImageUpload, Principal, Registration};

/// Organizer request to publish an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    pub draft: EventDraft,
    pub image: Option<ImageUpload>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventCommand: Send + Sync {
    /// Publish an event. Organizer only; the date may not be in the past.
    async fn create_event(
        &self,
        principal: &Principal,
        request: CreateEventRequest,
    ) -> Result<Event, Error>;

    /// Register the caller for an upcoming event.
    ///
    /// A repeated registration is a conflict and leaves the store unchanged.
    async fn register_for_event(
        &self,
        principal: &Principal,
        event_id: &EventId,
    ) -> Result<Registration, Error>;
}
