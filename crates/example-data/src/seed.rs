//! Generated record types.
//!
//! These mirror the backend's entities without depending on them. Event
//! dates are day offsets so the backend can anchor them to its own clock.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role of a generated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleSeed {
    /// Publishes events.
    Organizer,
    /// Registers for events.
    Volunteer,
}

/// A generated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleUser {
    /// Account identifier.
    pub id: Uuid,
    /// Display name satisfying the backend's rules.
    pub display_name: String,
    /// Unique lowercase email derived from the display name.
    pub email: String,
    /// Account role.
    pub role: RoleSeed,
}

/// A generated event published by one of the organizers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleEvent {
    /// Event identifier.
    pub id: Uuid,
    /// Organizer who owns the event.
    pub organizer_id: Uuid,
    /// Event title.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Street address, when the event has a fixed location.
    pub location_address: Option<String>,
    /// Days after the base date on which the event takes place (at least 1).
    pub days_from_base: u32,
}

/// A volunteer's sign-up for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleRegistration {
    /// Registered user.
    pub user_id: Uuid,
    /// Event registered for.
    pub event_id: Uuid,
}

/// A directed follow edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleFollow {
    /// User who follows.
    pub follower_id: Uuid,
    /// User being followed.
    pub followed_id: Uuid,
}

/// Skills listed by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleSkills {
    /// Skill owner.
    pub user_id: Uuid,
    /// Skill names from the catalogue.
    pub skills: Vec<String>,
}

/// Everything generated from one seed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleData {
    /// Organizers first, then volunteers.
    pub users: Vec<ExampleUser>,
    /// Events in generation order.
    pub events: Vec<ExampleEvent>,
    /// Registrations in the order they should be written.
    pub registrations: Vec<ExampleRegistration>,
    /// Follow edges; never self-loops and never repeated.
    pub follows: Vec<ExampleFollow>,
    /// Skill lists; users without skills are omitted.
    pub skills: Vec<ExampleSkills>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialise_camel_case() {
        let event = ExampleEvent {
            id: Uuid::nil(),
            organizer_id: Uuid::nil(),
            name: "Beach Cleanup".to_owned(),
            description: "Bring gloves.".to_owned(),
            location_address: None,
            days_from_base: 3,
        };
        let json = serde_json::to_string(&event).expect("serialise");
        assert!(json.contains("organizerId"));
        assert!(json.contains("daysFromBase"));
    }
}
