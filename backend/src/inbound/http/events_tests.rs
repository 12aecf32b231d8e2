//! Tests for event HTTP handlers.

use super::*;
use crate::domain::{
    DisplayName, Email, EventId, NewEvent, Principal, Registration, Role, SkillSet, UserId,
};
use crate::inbound::http::test_utils::{MockPorts, bearer};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

const EVENT_ID: &str = "00000000-0000-0000-0000-0000000000e1";

fn organizer() -> Principal {
    Principal::new(UserId::from_uuid(Uuid::from_u128(1)), Role::Organizer)
}

fn volunteer() -> Principal {
    Principal::new(UserId::from_uuid(Uuid::from_u128(2)), Role::Volunteer)
}

fn sample_event(date: &str) -> Event {
    Event::from_new(
        EventId::new(EVENT_ID).expect("event id"),
        NewEvent {
            draft: EventDraft::try_from_parts("Beach clean-up", date, "Gloves provided", None)
                .expect("valid draft"),
            organizer_id: organizer().user_id,
            image_url: None,
        },
    )
}

async fn call(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(
                web::scope("/api/v1")
                    .service(list_events)
                    .service(create_event)
                    .service(register_for_event)
                    .service(list_volunteers)
                    .service(organizer_events)
                    .service(volunteer_events),
            ),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

#[actix_web::test]
async fn feed_requires_a_token() {
    let (status, body) = call(
        MockPorts::default(),
        actix_test::TestRequest::get().uri("/api/v1/events"),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.get("message"), Some(&json!("missing bearer token")));
}

#[actix_web::test]
async fn feed_serialises_annotations_beside_event_fields() {
    let mut ports = MockPorts::signed_in_as(volunteer());
    ports.events_query.expect_feed().return_once(|_| {
        Ok(vec![AnnotatedEvent {
            event: sample_event("2030-06-20"),
            is_registered: true,
            connections_going: vec![DisplayName::new("Frida").expect("name")],
            connections_going_count: 1,
        }])
    });

    let (status, body) = call(
        ports,
        actix_test::TestRequest::get()
            .uri("/api/v1/events")
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let first = body.get(0).expect("one event");
    assert_eq!(first.get("id"), Some(&json!(EVENT_ID)));
    assert_eq!(first.get("date"), Some(&json!("2030-06-20")));
    assert_eq!(first.get("isRegistered"), Some(&json!(true)));
    assert_eq!(first.get("connectionsGoing"), Some(&json!(["Frida"])));
    assert_eq!(first.get("connectionsGoingCount"), Some(&json!(1)));
    assert!(first.get("event").is_none());
}

#[actix_web::test]
async fn create_returns_created_event() {
    let mut ports = MockPorts::signed_in_as(organizer());
    ports
        .events
        .expect_create_event()
        .withf(|principal, request| {
            principal.is_organizer()
                && request.draft.name() == "Beach clean-up"
                && request.draft.location_address() == Some("Pier 4")
                && request.image.is_some()
        })
        .return_once(|_, _| Ok(sample_event("2030-06-20")));

    let (status, body) = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/events")
            .insert_header(bearer())
            .set_json(json!({
                "name": " Beach clean-up ",
                "date": "2030-06-20",
                "description": "Gloves provided",
                "locationAddress": "Pier 4",
                "image": {"data": "iVBORw0KGgo=", "extension": "png"}
            })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.get("organizerId"), Some(&json!(organizer().user_id.to_string())));
}

#[rstest]
#[case(json!({"date": "2030-06-20", "description": "d"}), "name", "missing_field")]
#[case(json!({"name": "n", "date": "20/06/2030", "description": "d"}), "date", "invalid_value")]
#[case(json!({"name": "n", "date": "2030-06-20", "description": "   "}), "description", "invalid_value")]
#[case(json!({"name": "n", "date": "2030-06-20", "description": "d", "image": {"data": "AAEC", "extension": "bmp"}}), "image", "invalid_value")]
#[actix_web::test]
async fn create_rejects_malformed_bodies(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut ports = MockPorts::signed_in_as(organizer());
    ports.events.expect_create_event().never();

    let (status, payload) = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/events")
            .insert_header(bearer())
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload.pointer("/details/field"), Some(&json!(field)));
    assert_eq!(payload.pointer("/details/code"), Some(&json!(code)));
}

#[actix_web::test]
async fn create_surfaces_forbidden_for_volunteers() {
    let mut ports = MockPorts::signed_in_as(volunteer());
    ports
        .events
        .expect_create_event()
        .return_once(|_, _| Err(Error::forbidden("only organizers can create events")));

    let (status, _) = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/events")
            .insert_header(bearer())
            .set_json(json!({"name": "n", "date": "2030-06-20", "description": "d"})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn register_returns_created_registration() {
    let me = volunteer();
    let mut ports = MockPorts::signed_in_as(me);
    ports
        .events
        .expect_register_for_event()
        .withf(|_, event_id| event_id.to_string() == EVENT_ID)
        .return_once(move |principal, event_id| {
            Ok(Registration::new(principal.user_id, *event_id))
        });

    let (status, body) = call(
        ports,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/events/{EVENT_ID}/register"))
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.get("eventId"), Some(&json!(EVENT_ID)));
    assert_eq!(body.get("userId"), Some(&json!(me.user_id.to_string())));
}

#[actix_web::test]
async fn repeat_registration_conflicts() {
    let mut ports = MockPorts::signed_in_as(volunteer());
    ports
        .events
        .expect_register_for_event()
        .return_once(|_, _| Err(Error::conflict("already registered for this event")));

    let (status, body) = call(
        ports,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/events/{EVENT_ID}/register"))
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.get("code"), Some(&json!("conflict")));
}

#[actix_web::test]
async fn malformed_event_ids_are_rejected_before_the_service() {
    let mut ports = MockPorts::signed_in_as(organizer());
    ports.events_query.expect_roster().never();

    let (status, body) = call(
        ports,
        actix_test::TestRequest::get()
            .uri("/api/v1/events/not-a-uuid/volunteers")
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.pointer("/details/value"), Some(&json!("not-a-uuid")));
}

#[actix_web::test]
async fn roster_lists_volunteer_profiles() {
    let mut ports = MockPorts::signed_in_as(organizer());
    ports.events_query.expect_roster().return_once(|_, _| {
        Ok(vec![VolunteerProfile {
            user_id: volunteer().user_id,
            display_name: DisplayName::new("Hana").expect("name"),
            email: Email::new("hana@example.org").expect("email"),
            profile_image_url: None,
            skills: SkillSet::parse(["Driving", "First Aid"]).expect("skills"),
        }])
    });

    let (status, body) = call(
        ports,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/events/{EVENT_ID}/volunteers"))
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let first = body.get(0).expect("one volunteer");
    assert_eq!(first.get("displayName"), Some(&json!("Hana")));
    assert_eq!(first.get("skills"), Some(&json!(["Driving", "First Aid"])));
    assert!(first.get("profileImageUrl").is_none());
}

#[rstest]
#[case("/api/v1/organizer/events")]
#[case("/api/v1/volunteer/events")]
#[actix_web::test]
async fn dashboards_return_plain_events(#[case] uri: &str) {
    let mut ports = MockPorts::signed_in_as(organizer());
    ports
        .events_query
        .expect_organizer_events()
        .returning(|_| Ok(vec![sample_event("2030-06-20")]));
    ports
        .events_query
        .expect_volunteer_events()
        .returning(|_| Ok(vec![sample_event("2020-01-01")]));

    let (status, body) = call(
        ports,
        actix_test::TestRequest::get().uri(uri).insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert!(body.pointer("/0/isRegistered").is_none());
}
