//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every request-shape failure becomes `400 invalid_request` with a
//! `details` object naming the offending field and a machine-readable code.

use std::fmt::Display;

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, EventId, GroupId, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidValue,
    InvalidEncoding,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidEncoding => "invalid_encoding",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Wrap a domain validation failure for `field`.
pub(crate) fn invalid_field_error(field: FieldName, reason: impl Display) -> Error {
    field_error(field, ErrorCode::InvalidValue, reason.to_string())
}

pub(crate) fn invalid_encoding_error(field: FieldName, reason: impl Display) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::InvalidEncoding,
        format!("{name} must be base64 encoded: {reason}"),
    )
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    Error::invalid_request(format!("{name} must be a valid UUID")).with_details(json!({
        "field": name,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_user_id(value: &str) -> Result<UserId, Error> {
    parse_uuid(value, FieldName::new("userId")).map(UserId::from_uuid)
}

pub(crate) fn parse_event_id(value: &str) -> Result<EventId, Error> {
    parse_uuid(value, FieldName::new("eventId")).map(EventId::from_uuid)
}

pub(crate) fn parse_group_id(value: &str) -> Result<GroupId, Error> {
    parse_uuid(value, FieldName::new("groupId")).map(GroupId::from_uuid)
}
