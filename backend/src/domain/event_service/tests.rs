//! Tests for the event service.

use std::collections::HashSet;

use super::*;
use crate::domain::ports::{
    EventRepositoryError, MockBlobStore, MockEventRepository, MockRegistrationRepository,
    MockSkillRepository, MockSocialGraphRepository, MockUserRepository,
};
use crate::domain::{Email, ErrorCode, EventDraft, ImageUpload, SkillSet, User};
use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::rstest;
use uuid::Uuid;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// 2030-06-15, late in the UTC day.
fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: Utc
            .with_ymd_and_hms(2030, 6, 15, 23, 59, 0)
            .single()
            .expect("valid fixture timestamp"),
    })
}

#[derive(Default)]
struct Mocks {
    events: MockEventRepository,
    registrations: MockRegistrationRepository,
    users: MockUserRepository,
    social: MockSocialGraphRepository,
    skills: MockSkillRepository,
    blobs: MockBlobStore,
}

impl Mocks {
    fn into_service(self) -> EventService {
        EventService::new(
            EventStores {
                events: Arc::new(self.events),
                registrations: Arc::new(self.registrations),
                users: Arc::new(self.users),
                social: Arc::new(self.social),
                skills: Arc::new(self.skills),
                blobs: Arc::new(self.blobs),
            },
            fixture_clock(),
        )
    }
}

fn organizer() -> Principal {
    Principal::new(UserId::from_uuid(Uuid::from_u128(1)), Role::Organizer)
}

fn volunteer() -> Principal {
    Principal::new(UserId::from_uuid(Uuid::from_u128(2)), Role::Volunteer)
}

fn event_on(seq: u128, date: &str, organizer_id: UserId) -> Event {
    Event::from_new(
        EventId::from_uuid(Uuid::from_u128(seq)),
        NewEvent {
            draft: EventDraft::try_from_parts("Tree planting", date, "Bring a spade", None)
                .expect("valid draft"),
            organizer_id,
            image_url: None,
        },
    )
}

fn person(id: UserId, name: &str, role: Role) -> User {
    User::new(
        id,
        DisplayName::new(name).expect("name"),
        Email::new(format!("{}@example.org", name.to_lowercase())).expect("email"),
        role,
    )
}

fn create_request(date: &str, image: Option<ImageUpload>) -> CreateEventRequest {
    CreateEventRequest {
        draft: EventDraft::try_from_parts("Tree planting", date, "Bring a spade", None)
            .expect("valid draft"),
        image,
    }
}

#[rstest]
#[tokio::test]
async fn create_rejects_volunteers() {
    let service = Mocks::default().into_service();

    let error = service
        .create_event(&volunteer(), create_request("2030-07-01", None))
        .await
        .expect_err("volunteers cannot create events");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn create_rejects_past_dates() {
    let service = Mocks::default().into_service();

    let error = service
        .create_event(&organizer(), create_request("2030-06-14", None))
        .await
        .expect_err("past date rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.get("field")),
        Some(&serde_json::json!("date"))
    );
}

#[rstest]
#[tokio::test]
async fn create_accepts_today_and_stores_the_image() {
    let mut mocks = Mocks::default();
    mocks
        .blobs
        .expect_save()
        .times(1)
        .return_once(|_| Ok("/uploads/abc.png".to_owned()));
    mocks
        .events
        .expect_insert()
        .withf(|new_event| new_event.image_url.as_deref() == Some("/uploads/abc.png"))
        .times(1)
        .return_once(|new_event| Ok(Event::from_new(EventId::random(), new_event)));
    let image = ImageUpload::new(vec![1, 2, 3], "png").expect("valid upload");

    let event = mocks
        .into_service()
        .create_event(&organizer(), create_request("2030-06-15", Some(image)))
        .await
        .expect("event created");

    assert_eq!(event.organizer_id, organizer().user_id);
    assert_eq!(event.image_url.as_deref(), Some("/uploads/abc.png"));
}

#[rstest]
#[tokio::test]
async fn create_maps_connection_failures_to_unavailable() {
    let mut mocks = Mocks::default();
    mocks
        .events
        .expect_insert()
        .return_once(|_| Err(EventRepositoryError::connection("pool exhausted")));

    let error = mocks
        .into_service()
        .create_event(&organizer(), create_request("2030-06-20", None))
        .await
        .expect_err("store down");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn register_reports_missing_events() {
    let mut mocks = Mocks::default();
    mocks.events.expect_find_by_id().return_once(|_| Ok(None));

    let error = mocks
        .into_service()
        .register_for_event(&volunteer(), &EventId::random())
        .await
        .expect_err("unknown event");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn register_rejects_past_events() {
    let mut mocks = Mocks::default();
    let past = event_on(7, "2030-06-14", organizer().user_id);
    mocks
        .events
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(past)));

    let error = mocks
        .into_service()
        .register_for_event(&volunteer(), &EventId::from_uuid(Uuid::from_u128(7)))
        .await
        .expect_err("past event");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::Conflict))]
#[tokio::test]
async fn register_reports_repeats_as_conflicts(
    #[case] inserted: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut mocks = Mocks::default();
    let upcoming = event_on(8, "2030-06-15", organizer().user_id);
    mocks
        .events
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(upcoming)));
    mocks
        .registrations
        .expect_insert_if_absent()
        .return_once(move |_| Ok(inserted));

    let result = mocks
        .into_service()
        .register_for_event(&volunteer(), &EventId::from_uuid(Uuid::from_u128(8)))
        .await;

    assert_eq!(result.err().map(|e| e.code()), expected);
}

#[rstest]
#[tokio::test]
async fn feed_ranks_with_followed_names() {
    let viewer = volunteer();
    let friend = UserId::from_uuid(Uuid::from_u128(3));
    let near = event_on(10, "2030-06-16", organizer().user_id);
    let far = event_on(11, "2030-06-30", organizer().user_id);
    let far_id = far.id;
    let mut mocks = Mocks::default();
    mocks
        .events
        .expect_list_upcoming()
        .withf(|today| today.to_string() == "2030-06-15")
        .return_once(move |_| Ok(vec![near, far]));
    mocks
        .registrations
        .expect_list_all()
        .return_once(move || Ok(vec![Registration::new(friend, far_id)]));
    mocks
        .social
        .expect_outbound_edges()
        .return_once(move |_| Ok(HashSet::from([friend])));
    mocks
        .users
        .expect_find_many()
        .return_once(move |_| Ok(vec![person(friend, "Frida", Role::Volunteer)]));

    let feed = mocks
        .into_service()
        .feed(&viewer)
        .await
        .expect("feed builds");

    assert_eq!(feed[0].event.id, far_id);
    assert_eq!(feed[0].connections_going[0].as_ref(), "Frida");
    assert_eq!(feed[1].connections_going_count, 0);
}

#[rstest]
#[tokio::test]
async fn feed_skips_name_lookup_without_follows() {
    let mut mocks = Mocks::default();
    mocks.events.expect_list_upcoming().return_once(|_| Ok(vec![]));
    mocks.registrations.expect_list_all().return_once(|| Ok(vec![]));
    mocks
        .social
        .expect_outbound_edges()
        .return_once(|_| Ok(HashSet::new()));
    mocks.users.expect_find_many().never();

    let feed = mocks
        .into_service()
        .feed(&volunteer())
        .await
        .expect("feed builds");

    assert!(feed.is_empty());
}

#[rstest]
#[tokio::test]
async fn organizer_dashboard_sorts_by_date_then_id() {
    let owner = organizer();
    let mut mocks = Mocks::default();
    mocks.events.expect_list_by_organizer().return_once(move |_| {
        Ok(vec![
            event_on(3, "2030-07-01", owner.user_id),
            event_on(2, "2030-06-20", owner.user_id),
            event_on(1, "2030-07-01", owner.user_id),
        ])
    });

    let events = mocks
        .into_service()
        .organizer_events(&owner)
        .await
        .expect("dashboard");

    let ids: Vec<u128> = events.iter().map(|e| e.id.as_uuid().as_u128()).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[rstest]
#[tokio::test]
async fn organizer_dashboard_is_forbidden_to_volunteers() {
    let error = Mocks::default()
        .into_service()
        .organizer_events(&volunteer())
        .await
        .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn volunteer_dashboard_lists_registered_events() {
    let viewer = volunteer();
    let event = event_on(4, "2030-06-18", organizer().user_id);
    let event_id = event.id;
    let mut mocks = Mocks::default();
    mocks
        .registrations
        .expect_list_for_user()
        .return_once(move |_| Ok(vec![Registration::new(viewer.user_id, event_id)]));
    mocks
        .events
        .expect_find_many()
        .withf(move |ids| ids.to_vec() == vec![event_id])
        .return_once(move |_| Ok(vec![event]));

    let events = mocks
        .into_service()
        .volunteer_events(&viewer)
        .await
        .expect("dashboard");

    assert_eq!(events.len(), 1);
}

#[rstest]
#[tokio::test]
async fn roster_requires_ownership() {
    let someone_else = UserId::random();
    let mut mocks = Mocks::default();
    mocks
        .events
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(event_on(5, "2030-06-20", someone_else))));
    mocks.registrations.expect_list_for_event().never();

    let error = mocks
        .into_service()
        .roster(&organizer(), &EventId::from_uuid(Uuid::from_u128(5)))
        .await
        .expect_err("not the owner");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn roster_joins_volunteers_with_skills() {
    let owner = organizer();
    let helper = UserId::from_uuid(Uuid::from_u128(9));
    let event = event_on(6, "2030-06-20", owner.user_id);
    let event_id = event.id;
    let mut mocks = Mocks::default();
    mocks
        .events
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(event)));
    mocks
        .registrations
        .expect_list_for_event()
        .return_once(move |_| Ok(vec![Registration::new(helper, event_id)]));
    mocks
        .users
        .expect_find_many()
        .return_once(move |_| Ok(vec![person(helper, "Hana", Role::Volunteer)]));
    mocks.skills.expect_get_many().return_once(move |_| {
        Ok(HashMap::from([(
            helper,
            SkillSet::parse(["Carpentry"]).expect("skills"),
        )]))
    });

    let roster = mocks
        .into_service()
        .roster(&owner, &event_id)
        .await
        .expect("roster");

    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].skills.names(), vec!["Carpentry"]);
}
