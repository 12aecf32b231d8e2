//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are implemented by domain services and
//! called by inbound adapters. Driven ports (`*Repository`, [`AuthService`],
//! [`PasswordHasher`], [`BlobStore`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod auth_service;
mod blob_store;
mod event_command;
mod event_query;
mod event_repository;
mod example_data_seed_repository;
mod group_command;
mod group_query;
mod group_repository;
mod password_hasher;
mod profile_command;
mod profile_query;
mod registration_repository;
mod skill_repository;
mod social_command;
mod social_graph_repository;
mod social_query;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, LoginSession};
#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::{AuthService, AuthServiceError};
#[cfg(test)]
pub use blob_store::MockBlobStore;
pub use blob_store::{BlobStore, BlobStoreError};
#[cfg(test)]
pub use event_command::MockEventCommand;
pub use event_command::{CreateEventRequest, EventCommand};
#[cfg(test)]
pub use event_query::MockEventQuery;
pub use event_query::EventQuery;
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::{EventRepository, EventRepositoryError};
#[cfg(test)]
pub use example_data_seed_repository::MockExampleDataSeedRepository;
pub use example_data_seed_repository::{
    ExampleDataSeedRepository, ExampleDataSeedRepositoryError, ExampleDataSeedRequest,
    SeedingResult,
};
#[cfg(test)]
pub use group_command::MockGroupCommand;
pub use group_command::GroupCommand;
#[cfg(test)]
pub use group_query::MockGroupQuery;
pub use group_query::GroupQuery;
#[cfg(test)]
pub use group_repository::MockGroupRepository;
pub use group_repository::{GroupRepository, GroupRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{ProfileCommand, ProfileUpdate};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
pub use registration_repository::{RegistrationRepository, RegistrationRepositoryError};
#[cfg(test)]
pub use skill_repository::MockSkillRepository;
pub use skill_repository::{SkillRepository, SkillRepositoryError};
#[cfg(test)]
pub use social_command::MockSocialCommand;
pub use social_command::SocialCommand;
#[cfg(test)]
pub use social_graph_repository::MockSocialGraphRepository;
pub use social_graph_repository::{SocialGraphRepository, SocialGraphRepositoryError};
#[cfg(test)]
pub use social_query::MockSocialQuery;
pub use social_query::SocialQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserRepository, UserRepositoryError};
