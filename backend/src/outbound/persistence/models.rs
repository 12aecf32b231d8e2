//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence module. Reading a row back re-validates
//! it through the domain constructors, so a corrupt row surfaces as a query
//! error instead of an invalid entity.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    DisplayName, Email, Event, EventId, Group, GroupId, GroupName, PasswordHash, Registration,
    Role, User, UserId,
};

use super::schema::{
    events, example_data_runs, follows, group_members, groups, registrations, user_skills, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
    pub profile_image_url: Option<String>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, String> {
        let display_name = DisplayName::new(self.display_name).map_err(|e| e.to_string())?;
        let email = Email::new(&self.email).map_err(|e| e.to_string())?;
        let role = self.role.parse::<Role>().map_err(|e| e.to_string())?;
        Ok(
            User::new(UserId::from_uuid(self.id), display_name, email, role)
                .with_profile_image_url(self.profile_image_url),
        )
    }

    pub(crate) fn into_credentials(mut self) -> Result<(User, PasswordHash), String> {
        let hash = PasswordHash::new(std::mem::take(&mut self.password_hash));
        Ok((self.into_user()?, hash))
    }
}

/// Insertable struct for creating accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub display_name: &'a str,
    pub role: &'a str,
    pub profile_image_url: Option<&'a str>,
}

/// Changeset for the mutable profile fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileChangeset<'a> {
    pub display_name: &'a str,
    pub profile_image_url: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
    pub location_address: Option<String>,
    pub image_url: Option<String>,
    pub organizer_id: Uuid,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: EventId::from_uuid(row.id),
            name: row.name,
            date: row.date,
            description: row.description,
            location_address: row.location_address,
            image_url: row.image_url,
            organizer_id: UserId::from_uuid(row.organizer_id),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub date: NaiveDate,
    pub description: &'a str,
    pub location_address: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub organizer_id: Uuid,
}

impl<'a> From<&'a Event> for NewEventRow<'a> {
    fn from(event: &'a Event) -> Self {
        Self {
            id: *event.id.as_uuid(),
            name: &event.name,
            date: event.date,
            description: &event.description,
            location_address: event.location_address.as_deref(),
            image_url: event.image_url.as_deref(),
            organizer_id: *event.organizer_id.as_uuid(),
        }
    }
}

#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RegistrationRow {
    pub user_id: Uuid,
    pub event_id: Uuid,
}

impl From<RegistrationRow> for Registration {
    fn from(row: RegistrationRow) -> Self {
        Registration::new(
            UserId::from_uuid(row.user_id),
            EventId::from_uuid(row.event_id),
        )
    }
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = registrations)]
pub(crate) struct NewRegistrationRow {
    pub user_id: Uuid,
    pub event_id: Uuid,
}

/// Directed follow edge.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = follows)]
pub(crate) struct FollowRow {
    pub follower_id: Uuid,
    pub followed_id: Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_skills)]
pub(crate) struct NewSkillRow<'a> {
    pub user_id: Uuid,
    pub skill: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupRow {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
}

impl GroupRow {
    pub(crate) fn into_group(self) -> Result<Group, String> {
        let name = GroupName::new(&self.name).map_err(|e| e.to_string())?;
        Ok(Group::new(
            GroupId::from_uuid(self.id),
            name,
            UserId::from_uuid(self.created_by),
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = groups)]
pub(crate) struct NewGroupRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = group_members)]
pub(crate) struct MembershipRow {
    pub group_id: Uuid,
    pub user_id: Uuid,
}

/// Marker row written in the same transaction as a seed's data.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = example_data_runs)]
pub(crate) struct NewExampleDataRunRow<'a> {
    pub seed_key: &'a str,
    pub seed: i64,
    pub user_count: i32,
}
