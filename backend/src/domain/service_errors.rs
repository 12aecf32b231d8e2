//! Translation of driven-port failures into API errors.
//!
//! Connection failures become `service_unavailable`; everything else the
//! caller cannot fix becomes `internal`.

use tracing::warn;

use super::Error;
use super::ports::{
    AuthServiceError, BlobStoreError, EventRepositoryError, GroupRepositoryError,
    PasswordHasherError, RegistrationRepositoryError, SkillRepositoryError,
    SocialGraphRepositoryError, UserRepositoryError,
};

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict("email already registered"),
    }
}

pub(crate) fn map_event_error(error: EventRepositoryError) -> Error {
    match error {
        EventRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("event repository unavailable: {message}"))
        }
        EventRepositoryError::Query { message } => {
            Error::internal(format!("event repository error: {message}"))
        }
    }
}

pub(crate) fn map_registration_error(error: RegistrationRepositoryError) -> Error {
    match error {
        RegistrationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("registration repository unavailable: {message}"))
        }
        RegistrationRepositoryError::Query { message } => {
            Error::internal(format!("registration repository error: {message}"))
        }
    }
}

pub(crate) fn map_social_error(error: SocialGraphRepositoryError) -> Error {
    match error {
        SocialGraphRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("social graph unavailable: {message}"))
        }
        SocialGraphRepositoryError::Query { message } => {
            Error::internal(format!("social graph error: {message}"))
        }
    }
}

pub(crate) fn map_skill_error(error: SkillRepositoryError) -> Error {
    match error {
        SkillRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("skill repository unavailable: {message}"))
        }
        SkillRepositoryError::Query { message } => {
            Error::internal(format!("skill repository error: {message}"))
        }
    }
}

pub(crate) fn map_group_error(error: GroupRepositoryError) -> Error {
    match error {
        GroupRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("group repository unavailable: {message}"))
        }
        GroupRepositoryError::Query { message } => {
            Error::internal(format!("group repository error: {message}"))
        }
    }
}

pub(crate) fn map_blob_error(error: BlobStoreError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Token failures at issue time are server faults; at verify time the caller
/// is simply unauthenticated.
pub(crate) fn map_auth_error(error: AuthServiceError) -> Error {
    match error {
        AuthServiceError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
        AuthServiceError::Invalid { message } => {
            warn!(%message, "rejected bearer token");
            Error::unauthorized("invalid token")
        }
        AuthServiceError::Expired => Error::unauthorized("token expired"),
    }
}
