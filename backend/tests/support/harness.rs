//! Server harness and shared world for the HTTP behaviour suites.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Every service runs for real over the
//! in-memory stores; only the clock and the password hasher are doubles. The
//! `WorldFixture` stops the server even if a step panics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use async_trait::async_trait;
use awc::Client;
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use volunteer_hub::Trace;
use volunteer_hub::domain::ports::{AuthService, PasswordHasher, PasswordHasherError};
use volunteer_hub::domain::{
    AccountService, EventService, EventStores, GroupService, PasswordHash, ProfileService,
    SocialService, TRACE_ID_HEADER,
};
use volunteer_hub::inbound::http::accounts::{login, register};
use volunteer_hub::inbound::http::events::{
    create_event, list_events, list_volunteers, organizer_events, register_for_event,
    volunteer_events,
};
use volunteer_hub::inbound::http::groups::{create_group, join_group, leave_group, my_groups};
use volunteer_hub::inbound::http::profile::{
    current_profile, get_skills, replace_skills, update_profile,
};
use volunteer_hub::inbound::http::social::{
    add_friend, directory, follow, followers, following, unfollow,
};
use volunteer_hub::inbound::http::state::{HttpState, HttpStatePorts};
use volunteer_hub::outbound::auth::JwtAuthService;
use volunteer_hub::outbound::blob::DirBlobStore;
use volunteer_hub::outbound::memory::{
    MemoryEventStore, MemoryGroupStore, MemoryRegistrationStore, MemorySkillStore,
    MemorySocialGraph, MemoryUserStore,
};

pub(crate) const PASSWORD: &str = "correct horse battery";
const TOKEN_SECRET: &[u8] = b"behaviour-suite-signing-secret-0123456789";

/// Frozen at 2030-06-15 10:00 UTC.
pub(crate) struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 15, 10, 0, 0)
            .single()
            .expect("valid timestamp")
    }
}

pub(crate) fn today() -> NaiveDate {
    FixedClock.utc().date_naive()
}

/// Reversible stand-in for Argon2 so scenarios stay fast.
struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        Ok(PasswordHash::new(format!("plain${password}")))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        Ok(hash.as_ref() == format!("plain${password}"))
    }
}

/// Credentials of an account created during a scenario.
#[derive(Debug, Clone)]
pub(crate) struct Account {
    pub(crate) id: String,
    pub(crate) token: String,
}

/// Status, trace header and JSON body of one exchange.
#[derive(Debug, Clone)]
pub(crate) struct Reply {
    pub(crate) status: u16,
    pub(crate) trace_id: Option<String>,
    pub(crate) body: Value,
}

pub(crate) struct HubWorld {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    server: ServerHandle,
    _uploads: TempDir,
    pub(crate) accounts: HashMap<String, Account>,
    pub(crate) events: HashMap<String, String>,
    pub(crate) groups: HashMap<String, String>,
    pub(crate) last: Option<Reply>,
}

pub(crate) type SharedWorld = Rc<RefCell<HubWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we hold the
    // world while calling `block_on`. The future must not touch the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn http_state(uploads: &TempDir) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);
    let users = Arc::new(MemoryUserStore::new());
    let social = Arc::new(MemorySocialGraph::new());
    let skills = Arc::new(MemorySkillStore::new());
    let groups = Arc::new(MemoryGroupStore::new());
    let blobs = Arc::new(DirBlobStore::open(uploads.path(), "/uploads").expect("upload dir"));
    let auth: Arc<dyn AuthService> = Arc::new(JwtAuthService::new(
        TOKEN_SECRET,
        Duration::hours(1),
        clock.clone(),
    ));

    let accounts = Arc::new(AccountService::new(
        users.clone(),
        Arc::new(PlainHasher),
        auth.clone(),
    ));
    let events = Arc::new(EventService::new(
        EventStores {
            events: Arc::new(MemoryEventStore::new()),
            registrations: Arc::new(MemoryRegistrationStore::new()),
            users: users.clone(),
            social: social.clone(),
            skills: skills.clone(),
            blobs: blobs.clone(),
        },
        clock,
    ));
    let social_service = Arc::new(SocialService::new(users.clone(), social, groups.clone()));
    let profile = Arc::new(ProfileService::new(users, skills, blobs));
    let group_service = Arc::new(GroupService::new(groups));

    HttpState::new(HttpStatePorts {
        accounts,
        events: events.clone(),
        events_query: events,
        social: social_service.clone(),
        social_query: social_service,
        profile: profile.clone(),
        profile_query: profile,
        groups: group_service.clone(),
        groups_query: group_service,
        auth,
    })
}

async fn spawn_hub_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .service(register)
            .service(login)
            .service(list_events)
            .service(create_event)
            .service(register_for_event)
            .service(list_volunteers)
            .service(organizer_events)
            .service(volunteer_events)
            .service(follow)
            .service(unfollow)
            .service(add_friend)
            .service(directory)
            .service(following)
            .service(followers)
            .service(current_profile)
            .service(update_profile)
            .service(get_skills)
            .service(replace_skills)
            .service(create_group)
            .service(my_groups)
            .service(join_group)
            .service(leave_group);

        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

/// Start a server over fresh stores.
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let uploads = TempDir::new().expect("upload dir");
    let state = http_state(&uploads);
    let (base_url, server) = local
        .block_on(&runtime, spawn_hub_server(state))
        .expect("server starts");

    WorldFixture {
        world: Rc::new(RefCell::new(HubWorld {
            runtime,
            local,
            base_url,
            server,
            _uploads: uploads,
            accounts: HashMap::new(),
            events: HashMap::new(),
            groups: HashMap::new(),
            last: None,
        })),
    }
}

/// Send one request, optionally authenticated and with a JSON body.
pub(crate) fn send(
    world: &SharedWorld,
    method: Method,
    path: &str,
    token: Option<String>,
    payload: Option<Value>,
) -> Reply {
    let path = path.to_owned();
    with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}{path}"));
        if let Some(token) = token {
            request = request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await,
            None => request.send().await,
        }
        .expect("request is delivered");
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.body().await.expect("response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        Reply {
            status,
            trace_id,
            body,
        }
    })
}

/// Send as `name` and remember the reply for `then` steps.
pub(crate) fn send_as(
    world: &SharedWorld,
    name: &str,
    method: Method,
    path: &str,
    payload: Option<Value>,
) -> Reply {
    let token = account(world, name).token;
    let reply = send(world, method, path, Some(token), payload);
    world.borrow_mut().last = Some(reply.clone());
    reply
}

pub(crate) fn email_for(name: &str) -> String {
    format!("{}@example.org", name.to_ascii_lowercase().replace(' ', "."))
}

/// Create and sign in `name` unless the scenario already did.
pub(crate) fn ensure_account(world: &SharedWorld, name: &str, role: &str) -> Account {
    if let Some(existing) = world.borrow().accounts.get(name) {
        return existing.clone();
    }

    let email = email_for(name);
    let created = send(
        world,
        Method::POST,
        "/api/v1/register",
        None,
        Some(json!({
            "email": email,
            "password": PASSWORD,
            "displayName": name,
            "role": role,
        })),
    );
    assert_eq!(created.status, 201, "register {name}: {:?}", created.body);

    let session = send(
        world,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({"email": email, "password": PASSWORD})),
    );
    assert_eq!(session.status, 200, "login {name}: {:?}", session.body);

    let account = Account {
        id: session
            .body
            .pointer("/user/id")
            .and_then(Value::as_str)
            .expect("user id")
            .to_owned(),
        token: session
            .body
            .get("token")
            .and_then(Value::as_str)
            .expect("token")
            .to_owned(),
    };
    world
        .borrow_mut()
        .accounts
        .insert(name.to_owned(), account.clone());
    account
}

pub(crate) fn account(world: &SharedWorld, name: &str) -> Account {
    world
        .borrow()
        .accounts
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("no account named {name}"))
}

pub(crate) fn event_id(world: &SharedWorld, name: &str) -> String {
    world
        .borrow()
        .events
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("no event named {name}"))
}

pub(crate) fn last_reply(world: &SharedWorld) -> Reply {
    world.borrow().last.clone().expect("a request was sent")
}

/// Strip the quotes feature files put around names.
pub(crate) fn unquote(raw: &str) -> String {
    raw.trim().trim_matches('"').to_owned()
}

/// Split `"a", "b"` into names.
pub(crate) fn quoted_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(unquote)
        .filter(|name| !name.is_empty())
        .collect()
}
