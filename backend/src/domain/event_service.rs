//! Event publication, registration, feed and roster.
//!
//! "Today" comes from the injected clock and is read once per operation so a
//! request straddling midnight sees one consistent date.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, info};

use super::ports::{
    BlobStore, CreateEventRequest, EventCommand, EventQuery, EventRepository,
    RegistrationRepository, SkillRepository, SocialGraphRepository, UserRepository,
};
use super::service_errors::{
    map_blob_error, map_event_error, map_registration_error, map_skill_error, map_social_error,
    map_user_error,
};
use super::{
    AnnotatedEvent, DisplayName, Error, Event, EventId, FeedSnapshot, NewEvent, OwnedEvent, Principal,
    Registration, Role, UserId, VolunteerProfile, rank_events, roster_for, sort_by_date,
};

/// Driven ports the event service reads and writes.
#[derive(Clone)]
pub struct EventStores {
    pub events: Arc<dyn EventRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub users: Arc<dyn UserRepository>,
    pub social: Arc<dyn SocialGraphRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub blobs: Arc<dyn BlobStore>,
}

/// Implements [`EventCommand`] and [`EventQuery`].
#[derive(Clone)]
pub struct EventService {
    stores: EventStores,
    clock: Arc<dyn Clock>,
}

impl EventService {
    pub fn new(stores: EventStores, clock: Arc<dyn Clock>) -> Self {
        Self { stores, clock }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    async fn require_event(&self, event_id: &EventId) -> Result<Event, Error> {
        self.stores
            .events
            .find_by_id(event_id)
            .await
            .map_err(map_event_error)?
            .ok_or_else(|| Error::not_found(format!("event {event_id} not found")))
    }

    async fn display_names(
        &self,
        ids: impl IntoIterator<Item = UserId>,
    ) -> Result<HashMap<UserId, DisplayName>, Error> {
        let ids: Vec<UserId> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = self
            .stores
            .users
            .find_many(&ids)
            .await
            .map_err(map_user_error)?;
        Ok(users
            .into_iter()
            .map(|user| (*user.id(), user.display_name().clone()))
            .collect())
    }
}

#[async_trait]
impl EventCommand for EventService {
    async fn create_event(
        &self,
        principal: &Principal,
        request: CreateEventRequest,
    ) -> Result<Event, Error> {
        if !principal.is_organizer() {
            return Err(Error::forbidden("only organizers can create events"));
        }
        let CreateEventRequest { draft, image } = request;
        let today = self.today();
        if draft.date() < today {
            return Err(Error::invalid_request("event date must not be in the past")
                .with_details(serde_json::json!({
                    "field": "date",
                    "today": today.to_string(),
                })));
        }

        let image_url = match image {
            Some(upload) => Some(
                self.stores
                    .blobs
                    .save(&upload)
                    .await
                    .map_err(map_blob_error)?,
            ),
            None => None,
        };

        let event = self
            .stores
            .events
            .insert(NewEvent {
                draft,
                organizer_id: principal.user_id,
                image_url,
            })
            .await
            .map_err(map_event_error)?;
        info!(event_id = %event.id, organizer_id = %principal.user_id, "event created");
        Ok(event)
    }

    async fn register_for_event(
        &self,
        principal: &Principal,
        event_id: &EventId,
    ) -> Result<Registration, Error> {
        let event = self.require_event(event_id).await?;
        if event.is_past(self.today()) {
            return Err(Error::invalid_request("event has already taken place"));
        }

        let registration = Registration::new(principal.user_id, event.id);
        let inserted = self
            .stores
            .registrations
            .insert_if_absent(&registration)
            .await
            .map_err(map_registration_error)?;
        if !inserted {
            return Err(Error::conflict("already registered for this event"));
        }
        info!(%event_id, user_id = %principal.user_id, "registered for event");
        Ok(registration)
    }
}

#[async_trait]
impl EventQuery for EventService {
    async fn feed(&self, principal: &Principal) -> Result<Vec<AnnotatedEvent>, Error> {
        let today = self.today();
        let events = self
            .stores
            .events
            .list_upcoming(today)
            .await
            .map_err(map_event_error)?;
        let registrations = self
            .stores
            .registrations
            .list_all()
            .await
            .map_err(map_registration_error)?;
        let following = self
            .stores
            .social
            .outbound_edges(&principal.user_id)
            .await
            .map_err(map_social_error)?;
        let names = self.display_names(following.iter().copied()).await?;

        let feed = rank_events(
            &principal.user_id,
            today,
            FeedSnapshot {
                events: &events,
                registrations: &registrations,
                following: &following,
                names: &names,
            },
        );
        debug!(viewer = %principal.user_id, events = feed.len(), "ranked feed");
        Ok(feed)
    }

    async fn organizer_events(&self, principal: &Principal) -> Result<Vec<Event>, Error> {
        if principal.role != Role::Organizer {
            return Err(Error::forbidden("only organizers have an organizer dashboard"));
        }
        let mut events = self
            .stores
            .events
            .list_by_organizer(&principal.user_id)
            .await
            .map_err(map_event_error)?;
        sort_by_date(&mut events);
        Ok(events)
    }

    async fn volunteer_events(&self, principal: &Principal) -> Result<Vec<Event>, Error> {
        let registrations = self
            .stores
            .registrations
            .list_for_user(&principal.user_id)
            .await
            .map_err(map_registration_error)?;
        let ids: Vec<EventId> = registrations.iter().map(|r| r.event_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut events = self
            .stores
            .events
            .find_many(&ids)
            .await
            .map_err(map_event_error)?;
        sort_by_date(&mut events);
        Ok(events)
    }

    async fn roster(
        &self,
        principal: &Principal,
        event_id: &EventId,
    ) -> Result<Vec<VolunteerProfile>, Error> {
        let event = self.require_event(event_id).await?;
        let owned = OwnedEvent::verify(&event, principal)?;

        let registrations = self
            .stores
            .registrations
            .list_for_event(event_id)
            .await
            .map_err(map_registration_error)?;
        let registrant_ids: Vec<UserId> = registrations.iter().map(|r| r.user_id).collect();
        if registrant_ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self
            .stores
            .users
            .find_many(&registrant_ids)
            .await
            .map_err(map_user_error)?;
        let skills = self
            .stores
            .skills
            .get_many(&registrant_ids)
            .await
            .map_err(map_skill_error)?;

        Ok(roster_for(owned, &registrations, &users, &skills))
    }
}

#[cfg(test)]
mod tests;
