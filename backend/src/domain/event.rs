//! Volunteer events and registrations.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Maximum accepted event name length.
pub const EVENT_NAME_MAX: usize = 120;
/// Maximum accepted description length.
pub const EVENT_DESCRIPTION_MAX: usize = 4000;
/// Maximum accepted location length.
pub const EVENT_LOCATION_MAX: usize = 255;

/// Validation errors raised while building an [`EventDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
    EmptyDescription,
    DescriptionTooLong { max: usize },
    LocationTooLong { max: usize },
    InvalidDate { value: String },
}

impl EventValidationError {
    /// Request field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyDescription | Self::DescriptionTooLong { .. } => "description",
            Self::LocationTooLong { .. } => "locationAddress",
            Self::InvalidDate { .. } => "date",
        }
    }
}

impl fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "event id must be a valid UUID"),
            Self::EmptyName => write!(f, "event name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "event name must be at most {max} characters")
            }
            Self::EmptyDescription => write!(f, "event description must not be empty"),
            Self::DescriptionTooLong { max } => {
                write!(f, "event description must be at most {max} characters")
            }
            Self::LocationTooLong { max } => {
                write!(f, "location must be at most {max} characters")
            }
            Self::InvalidDate { value } => {
                write!(f, "date must use the YYYY-MM-DD format, got '{value}'")
            }
        }
    }
}

impl std::error::Error for EventValidationError {}

/// Stable event identifier.
///
/// Ordering follows the UUID byte order and is the final tie-break of every
/// event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Parse an identifier from its textual form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EventValidationError> {
        Uuid::parse_str(raw.as_ref())
            .map(Self)
            .map_err(|_| EventValidationError::InvalidId)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_event_date(raw: &str) -> Result<NaiveDate, EventValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        EventValidationError::InvalidDate {
            value: raw.to_owned(),
        }
    })
}

/// Validated organizer input for a new event.
///
/// The draft does not know the current date; the event service rejects past
/// dates against its clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    name: String,
    date: NaiveDate,
    description: String,
    location_address: Option<String>,
}

impl EventDraft {
    /// Validate raw event fields.
    ///
    /// # Examples
    /// ```
    /// use volunteer_hub::domain::EventDraft;
    ///
    /// let draft = EventDraft::try_from_parts("Beach clean", "2030-05-01", "Bring gloves", None)
    ///     .expect("valid draft");
    /// assert_eq!(draft.name(), "Beach clean");
    /// ```
    pub fn try_from_parts(
        name: &str,
        date: &str,
        description: &str,
        location_address: Option<&str>,
    ) -> Result<Self, EventValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EventValidationError::EmptyName);
        }
        if name.chars().count() > EVENT_NAME_MAX {
            return Err(EventValidationError::NameTooLong {
                max: EVENT_NAME_MAX,
            });
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(EventValidationError::EmptyDescription);
        }
        if description.chars().count() > EVENT_DESCRIPTION_MAX {
            return Err(EventValidationError::DescriptionTooLong {
                max: EVENT_DESCRIPTION_MAX,
            });
        }
        let location_address = location_address
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        if location_address
            .as_deref()
            .is_some_and(|value| value.chars().count() > EVENT_LOCATION_MAX)
        {
            return Err(EventValidationError::LocationTooLong {
                max: EVENT_LOCATION_MAX,
            });
        }
        Ok(Self {
            name: name.to_owned(),
            date: parse_event_date(date)?,
            description: description.to_owned(),
            location_address,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location_address(&self) -> Option<&str> {
        self.location_address.as_deref()
    }
}

/// Everything an event store needs to persist a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub draft: EventDraft,
    pub organizer_id: UserId,
    pub image_url: Option<String>,
}

/// Published event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// Calendar date serialised as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub organizer_id: UserId,
}

impl Event {
    /// Materialise a stored event from a draft and its assigned identifier.
    pub fn from_new(id: EventId, new_event: NewEvent) -> Self {
        let NewEvent {
            draft,
            organizer_id,
            image_url,
        } = new_event;
        Self {
            id,
            name: draft.name,
            date: draft.date,
            description: draft.description,
            location_address: draft.location_address,
            image_url,
            organizer_id,
        }
    }

    /// Whether the event date lies strictly before `today`.
    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.date < today
    }
}

/// Sort events by date ascending, then id ascending.
pub fn sort_by_date(events: &mut [Event]) {
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
}

/// A user's sign-up for an event. At most one exists per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub user_id: UserId,
    pub event_id: EventId,
}

impl Registration {
    pub const fn new(user_id: UserId, event_id: EventId) -> Self {
        Self { user_id, event_id }
    }
}
