//! Domain primitives, ranking engines and services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and persistence
//! layers, the pure feed, roster and directory engines, and the services that
//! implement the driving ports by feeding those engines from driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - User, Event, Registration, Group, SkillSet: core entities.
//! - rank_events, roster_for, rank_candidates: the pure engines.
//! - *Service: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod directory;
pub mod error;
pub mod event;
pub mod event_service;
pub mod group;
pub mod group_service;
pub mod ports;
pub mod profile_service;
pub mod ranking;
pub mod roster;
pub(crate) mod service_errors;
pub mod skill;
pub mod social_service;
pub mod trace_id;
pub mod upload;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    CredentialsValidationError, IssuedToken, LoginCredentials, PASSWORD_MIN, PasswordHash,
    Principal, SignUp,
};
pub use self::directory::{Candidate, SocialView, by_display_name, rank_candidates};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::event::{
    Event, EventDraft, EventId, EventValidationError, NewEvent, Registration, parse_event_date,
    sort_by_date,
};
pub use self::event_service::{EventService, EventStores};
pub use self::group::{
    Group, GroupId, GroupName, GroupValidationError, sort_by_name as sort_groups_by_name,
};
pub use self::group_service::GroupService;
pub use self::profile_service::ProfileService;
pub use self::ranking::{AnnotatedEvent, CONNECTIONS_PREVIEW_MAX, FeedSnapshot, rank_events};
pub use self::roster::{OwnedEvent, VolunteerProfile, roster_for};
pub use self::skill::{Skill, SkillSet, SkillValidationError};
pub use self::social_service::SocialService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload::{ImageExtension, ImageUpload, UploadValidationError};
pub use self::user::{DisplayName, Email, Role, User, UserId, UserValidationError};
