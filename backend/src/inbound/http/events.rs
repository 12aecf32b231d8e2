//! Event API handlers.
//!
//! ```text
//! GET  /api/v1/events                       Ranked feed for the caller
//! POST /api/v1/events                       Publish an event (organizers)
//! POST /api/v1/events/{event_id}/register   Register for an event
//! GET  /api/v1/events/{event_id}/volunteers Roster for an owned event
//! GET  /api/v1/organizer/events             Events the caller published
//! GET  /api/v1/volunteer/events             Events the caller registered for
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::CreateEventRequest;
use crate::domain::{AnnotatedEvent, Error, Event, EventDraft, VolunteerProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{
    AnnotatedEventSchema, ErrorSchema, EventSchema, RegistrationSchema, VolunteerProfileSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::uploads::ImagePayload;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, missing_field_error, parse_event_id,
};

/// Request body for `POST /api/v1/events`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventBody {
    #[schema(example = "Beach clean-up")]
    pub name: Option<String>,
    /// Calendar date, `YYYY-MM-DD`, not before today (UTC).
    #[schema(example = "2030-06-15")]
    pub date: Option<String>,
    pub description: Option<String>,
    pub location_address: Option<String>,
    pub image: Option<ImagePayload>,
}

/// Path parameters for per-event routes.
#[derive(Debug, Deserialize)]
pub struct EventPath {
    event_id: String,
}

impl TryFrom<CreateEventBody> for CreateEventRequest {
    type Error = Error;

    fn try_from(body: CreateEventBody) -> Result<Self, Self::Error> {
        let name = body
            .name
            .ok_or_else(|| missing_field_error(FieldName::new("name")))?;
        let date = body
            .date
            .ok_or_else(|| missing_field_error(FieldName::new("date")))?;
        let description = body
            .description
            .ok_or_else(|| missing_field_error(FieldName::new("description")))?;
        let draft = EventDraft::try_from_parts(
            &name,
            &date,
            &description,
            body.location_address.as_deref(),
        )
        .map_err(|err| invalid_field_error(FieldName::new(err.field()), &err))?;
        let image = body
            .image
            .map(|payload| payload.into_upload(FieldName::new("image")))
            .transpose()?;
        Ok(Self { draft, image })
    }
}

/// Upcoming events ranked by social proof.
///
/// Events with at least one followed registrant come first; within each tier
/// events are ordered by date, then id.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    responses(
        (status = 200, description = "Ranked feed", body = [AnnotatedEventSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<Vec<AnnotatedEvent>>> {
    let feed = state.events_query.feed(auth.principal()).await?;
    Ok(web::Json(feed))
}

/// Publish a new event.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = CreateEventBody,
    responses(
        (status = 201, description = "Event created", body = EventSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Organizers only", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/events")]
pub async fn create_event(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<CreateEventBody>,
) -> ApiResult<HttpResponse> {
    let request = CreateEventRequest::try_from(payload.into_inner())?;
    let event = state
        .events
        .create_event(auth.principal(), request)
        .await?;
    Ok(HttpResponse::Created().json(event))
}

/// Register the caller for an event.
#[utoipa::path(
    post,
    path = "/api/v1/events/{event_id}/register",
    params(
        ("event_id" = String, Path, description = "Event identifier")
    ),
    responses(
        (status = 201, description = "Registered", body = RegistrationSchema),
        (status = 400, description = "Invalid id or past event", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Event not found", body = ErrorSchema),
        (status = 409, description = "Already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "registerForEvent"
)]
#[post("/events/{event_id}/register")]
pub async fn register_for_event(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<EventPath>,
) -> ApiResult<HttpResponse> {
    let event_id = parse_event_id(&path.event_id)?;
    let registration = state
        .events
        .register_for_event(auth.principal(), &event_id)
        .await?;
    Ok(HttpResponse::Created().json(registration))
}

/// Volunteers registered for an event the caller organizes.
#[utoipa::path(
    get,
    path = "/api/v1/events/{event_id}/volunteers",
    params(
        ("event_id" = String, Path, description = "Event identifier")
    ),
    responses(
        (status = 200, description = "Roster sorted by user id", body = [VolunteerProfileSchema]),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the event's organizer", body = ErrorSchema),
        (status = 404, description = "Event not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "listEventVolunteers"
)]
#[get("/events/{event_id}/volunteers")]
pub async fn list_volunteers(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<EventPath>,
) -> ApiResult<web::Json<Vec<VolunteerProfile>>> {
    let event_id = parse_event_id(&path.event_id)?;
    let roster = state
        .events_query
        .roster(auth.principal(), &event_id)
        .await?;
    Ok(web::Json(roster))
}

/// Organizer dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/organizer/events",
    responses(
        (status = 200, description = "Published events by date", body = [EventSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Organizers only", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "listOrganizerEvents"
)]
#[get("/organizer/events")]
pub async fn organizer_events(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<Vec<Event>>> {
    let events = state
        .events_query
        .organizer_events(auth.principal())
        .await?;
    Ok(web::Json(events))
}

/// Volunteer dashboard, past events included.
#[utoipa::path(
    get,
    path = "/api/v1/volunteer/events",
    responses(
        (status = 200, description = "Registered events by date", body = [EventSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "listVolunteerEvents"
)]
#[get("/volunteer/events")]
pub async fn volunteer_events(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<Vec<Event>>> {
    let events = state
        .events_query
        .volunteer_events(auth.principal())
        .await?;
    Ok(web::Json(events))
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
