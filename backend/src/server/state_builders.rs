//! Builders for the store bundle and the HTTP state wired over it.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use volunteer_hub::domain::ports::{
    AuthService, BlobStore, EventRepository, ExampleDataSeedRepository, GroupRepository,
    PasswordHasher, RegistrationRepository, SkillRepository, SocialGraphRepository,
    UserRepository,
};
use volunteer_hub::domain::{
    AccountService, EventService, EventStores, GroupService, ProfileService, SocialService,
};
use volunteer_hub::inbound::http::state::{HttpState, HttpStatePorts};
use volunteer_hub::inbound::http::token_config::TokenSettings;
use volunteer_hub::outbound::auth::JwtAuthService;
use volunteer_hub::outbound::memory::{
    MemoryEventStore, MemoryExampleDataSeeder, MemoryGroupStore, MemoryRegistrationStore,
    MemorySkillStore, MemorySocialGraph, MemoryUserStore,
};
use volunteer_hub::outbound::persistence::{
    DbPool, DieselEventRepository, DieselExampleDataSeedRepository, DieselGroupRepository,
    DieselRegistrationRepository, DieselSkillRepository, DieselSocialGraphRepository,
    DieselUserRepository,
};

/// Every driven store the services read and write.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserRepository>,
    pub events: Arc<dyn EventRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub social: Arc<dyn SocialGraphRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub seeds: Arc<dyn ExampleDataSeedRepository>,
}

impl Stores {
    /// Process-local stores; state is lost on restart.
    pub fn in_memory() -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let events = Arc::new(MemoryEventStore::new());
        let registrations = Arc::new(MemoryRegistrationStore::new());
        let social = Arc::new(MemorySocialGraph::new());
        let skills = Arc::new(MemorySkillStore::new());
        let seeds = Arc::new(MemoryExampleDataSeeder::new(
            users.clone(),
            events.clone(),
            registrations.clone(),
            social.clone(),
            skills.clone(),
        ));
        Self {
            users,
            events,
            registrations,
            social,
            skills,
            groups: Arc::new(MemoryGroupStore::new()),
            seeds,
        }
    }

    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            events: Arc::new(DieselEventRepository::new(pool.clone())),
            registrations: Arc::new(DieselRegistrationRepository::new(pool.clone())),
            social: Arc::new(DieselSocialGraphRepository::new(pool.clone())),
            skills: Arc::new(DieselSkillRepository::new(pool.clone())),
            groups: Arc::new(DieselGroupRepository::new(pool.clone())),
            seeds: Arc::new(DieselExampleDataSeedRepository::new(pool.clone())),
        }
    }
}

/// Collaborators that are not stores.
pub struct Adapters {
    pub blobs: Arc<dyn BlobStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
}

/// Wire every service over `stores` and expose them as driving ports.
pub fn build_http_state(
    stores: &Stores,
    adapters: Adapters,
    tokens: &TokenSettings,
) -> web::Data<HttpState> {
    let Adapters {
        blobs,
        hasher,
        clock,
    } = adapters;
    let auth: Arc<dyn AuthService> = Arc::new(JwtAuthService::new(
        tokens.secret.as_slice(),
        tokens.ttl,
        clock.clone(),
    ));

    let accounts = Arc::new(AccountService::new(
        stores.users.clone(),
        hasher,
        auth.clone(),
    ));
    let events = Arc::new(EventService::new(
        EventStores {
            events: stores.events.clone(),
            registrations: stores.registrations.clone(),
            users: stores.users.clone(),
            social: stores.social.clone(),
            skills: stores.skills.clone(),
            blobs: blobs.clone(),
        },
        clock,
    ));
    let social = Arc::new(SocialService::new(
        stores.users.clone(),
        stores.social.clone(),
        stores.groups.clone(),
    ));
    let profile = Arc::new(ProfileService::new(
        stores.users.clone(),
        stores.skills.clone(),
        blobs,
    ));
    let groups = Arc::new(GroupService::new(stores.groups.clone()));

    web::Data::new(HttpState::new(HttpStatePorts {
        accounts,
        events: events.clone(),
        events_query: events,
        social: social.clone(),
        social_query: social,
        profile: profile.clone(),
        profile_query: profile,
        groups: groups.clone(),
        groups_query: groups,
        auth,
    }))
}

/// Adapters backed by the system clock.
pub fn default_adapters(
    blobs: Arc<dyn BlobStore>,
    hasher: Arc<dyn PasswordHasher>,
) -> Adapters {
    Adapters {
        blobs,
        hasher,
        clock: Arc::new(DefaultClock),
    }
}
