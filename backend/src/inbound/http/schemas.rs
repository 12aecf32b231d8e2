//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; the wrappers below mirror their
//! wire shape and register under the domain type's path so handler
//! annotations and the generated document agree with what serde emits.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The action was already performed or clashes with existing data.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "event date must not be in the past")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "6f1c2b1e-8a43-4c37-9d0e-3f0f4d6d2a10")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Role`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    Organizer,
    Volunteer,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ada Lovelace")]
    display_name: String,
    #[schema(example = "ada@example.org")]
    email: String,
    role: RoleSchema,
    profile_image_url: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Event`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Event, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EventSchema {
    #[schema(example = "0b6f5f0e-64c4-4a49-9f4c-0d3b0d3f8f11")]
    id: String,
    #[schema(example = "Beach clean-up")]
    name: String,
    #[schema(example = "2030-06-15", format = Date)]
    date: String,
    description: String,
    location_address: Option<String>,
    #[schema(example = "/uploads/5d41402a.png")]
    image_url: Option<String>,
    organizer_id: String,
}

/// OpenAPI schema for [`crate::domain::AnnotatedEvent`].
///
/// Event fields are inlined next to the viewer-specific annotations.
#[derive(ToSchema)]
#[schema(as = crate::domain::AnnotatedEvent, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AnnotatedEventSchema {
    id: String,
    name: String,
    #[schema(format = Date)]
    date: String,
    description: String,
    location_address: Option<String>,
    image_url: Option<String>,
    organizer_id: String,
    /// Whether the viewer is registered.
    is_registered: bool,
    /// Up to three followed users who are registered.
    #[schema(example = json!(["Ada Lovelace"]))]
    connections_going: Vec<String>,
    /// Number of followed users who are registered.
    connections_going_count: usize,
}

/// OpenAPI schema for [`crate::domain::Registration`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Registration, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RegistrationSchema {
    user_id: String,
    event_id: String,
}

/// OpenAPI schema for [`crate::domain::VolunteerProfile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::VolunteerProfile, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct VolunteerProfileSchema {
    user_id: String,
    display_name: String,
    email: String,
    profile_image_url: Option<String>,
    #[schema(example = json!(["First Aid", "Driving"]))]
    skills: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::Candidate`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Candidate, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CandidateSchema {
    id: String,
    display_name: String,
    email: String,
    role: RoleSchema,
    profile_image_url: Option<String>,
    /// The candidate already follows the viewer.
    is_followed: bool,
    /// The candidate shares at least one group with the viewer.
    shares_group: bool,
}

/// OpenAPI schema for [`crate::domain::Group`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Group, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GroupSchema {
    id: String,
    #[schema(example = "Saturday litter pickers")]
    name: String,
    created_by: String,
}
