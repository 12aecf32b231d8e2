//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api/v1` plus the health probes,
//! the schema wrappers from [`crate::inbound::http::schemas`], and a bearer
//! token security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` writes it out for client generation.

use crate::inbound::http::accounts::{LoginRequest, LoginResponse, RegisterRequest};
use crate::inbound::http::events::CreateEventBody;
use crate::inbound::http::groups::CreateGroupBody;
use crate::inbound::http::profile::{SkillsBody, UpdateProfileBody};
use crate::inbound::http::schemas::{
    AnnotatedEventSchema, CandidateSchema, ErrorCodeSchema, ErrorSchema, EventSchema,
    GroupSchema, RegistrationSchema, RoleSchema, UserSchema, VolunteerProfileSchema,
};
use crate::inbound::http::uploads::ImagePayload;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "BearerToken";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /api/v1/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Volunteer hub API",
        description = "Events, registrations and the social graph that ranks them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::create_event,
        crate::inbound::http::events::register_for_event,
        crate::inbound::http::events::list_volunteers,
        crate::inbound::http::events::organizer_events,
        crate::inbound::http::events::volunteer_events,
        crate::inbound::http::social::follow,
        crate::inbound::http::social::unfollow,
        crate::inbound::http::social::add_friend,
        crate::inbound::http::social::directory,
        crate::inbound::http::social::following,
        crate::inbound::http::social::followers,
        crate::inbound::http::profile::current_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::get_skills,
        crate::inbound::http::profile::replace_skills,
        crate::inbound::http::groups::create_group,
        crate::inbound::http::groups::join_group,
        crate::inbound::http::groups::leave_group,
        crate::inbound::http::groups::my_groups,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RoleSchema,
        UserSchema,
        EventSchema,
        AnnotatedEventSchema,
        RegistrationSchema,
        VolunteerProfileSchema,
        CandidateSchema,
        GroupSchema,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        CreateEventBody,
        CreateGroupBody,
        UpdateProfileBody,
        SkillsBody,
        ImagePayload,
    )),
    tags(
        (name = "accounts", description = "Registration and login"),
        (name = "events", description = "Event feed, publishing, registration and rosters"),
        (name = "social", description = "Follows, friendships and the people directory"),
        (name = "profile", description = "The caller's account and skills"),
        (name = "groups", description = "Groups used to suggest connections"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
