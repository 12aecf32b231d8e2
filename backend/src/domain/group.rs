//! Volunteer groups. Shared membership feeds the directory ranking.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Maximum group name length.
pub const GROUP_NAME_MAX: usize = 64;

/// Validation errors for group input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
}

impl fmt::Display for GroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "group id must be a valid UUID"),
            Self::EmptyName => write!(f, "group name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "group name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for GroupValidationError {}

/// Stable group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, GroupValidationError> {
        Uuid::parse_str(raw.as_ref())
            .map(Self)
            .map_err(|_| GroupValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty group name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupName(String);

impl GroupName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, GroupValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GroupValidationError::EmptyName);
        }
        if trimmed.chars().count() > GROUP_NAME_MAX {
            return Err(GroupValidationError::NameTooLong {
                max: GROUP_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for GroupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<GroupName> for String {
    fn from(value: GroupName) -> Self {
        value.0
    }
}

impl TryFrom<String> for GroupName {
    type Error = GroupValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Named set of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: GroupName,
    pub created_by: UserId,
}

impl Group {
    pub fn new(id: GroupId, name: GroupName, created_by: UserId) -> Self {
        Self {
            id,
            name,
            created_by,
        }
    }
}

/// Sort groups by name (case-insensitive), then id.
pub fn sort_by_name(groups: &mut [Group]) {
    groups.sort_by(|a, b| {
        a.name
            .as_ref()
            .to_lowercase()
            .cmp(&b.name.as_ref().to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}
