//! Volunteer roster for a single event.
//!
//! Only the organizer who owns an event may read its roster. [`OwnedEvent`]
//! can only be obtained through [`OwnedEvent::verify`], so [`roster_for`]
//! cannot be reached without the ownership check.

use std::collections::HashMap;

use serde::Serialize;

use super::{DisplayName, Email, Error, Event, Principal, Registration, Role, SkillSet, User, UserId};

/// Proof that the requester owns the wrapped event.
#[derive(Debug, Clone, Copy)]
pub struct OwnedEvent<'a> {
    event: &'a Event,
}

impl<'a> OwnedEvent<'a> {
    /// Check that `requester` is an organizer and owns `event`.
    ///
    /// # Errors
    /// Returns a forbidden error when either condition fails.
    pub fn verify(event: &'a Event, requester: &Principal) -> Result<Self, Error> {
        if !requester.is_organizer() {
            return Err(Error::forbidden("only organizers can view volunteer rosters"));
        }
        if event.organizer_id != requester.user_id {
            return Err(Error::forbidden(
                "only the event's organizer can view its volunteers",
            ));
        }
        Ok(Self { event })
    }

    pub fn event(&self) -> &'a Event {
        self.event
    }
}

/// A registered volunteer with their skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerProfile {
    pub user_id: UserId,
    pub display_name: DisplayName,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    pub skills: SkillSet,
}

/// Build the roster of volunteers registered for the owned event.
///
/// Organizer registrants are left out. Registrants missing from `users` are
/// skipped. The result is ordered by user id.
pub fn roster_for(
    owned: OwnedEvent<'_>,
    registrations: &[Registration],
    users: &[User],
    skills: &HashMap<UserId, SkillSet>,
) -> Vec<VolunteerProfile> {
    let event_id = owned.event().id;
    let by_id: HashMap<&UserId, &User> = users.iter().map(|user| (user.id(), user)).collect();

    let mut roster: Vec<VolunteerProfile> = registrations
        .iter()
        .filter(|registration| registration.event_id == event_id)
        .filter_map(|registration| by_id.get(&registration.user_id).copied())
        .filter(|user| user.role() == Role::Volunteer)
        .map(|user| VolunteerProfile {
            user_id: *user.id(),
            display_name: user.display_name().clone(),
            email: user.email().clone(),
            profile_image_url: user.profile_image_url().map(str::to_owned),
            skills: skills.get(user.id()).cloned().unwrap_or_default(),
        })
        .collect();

    roster.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    roster.dedup_by(|a, b| a.user_id == b.user_id);
    roster
}
