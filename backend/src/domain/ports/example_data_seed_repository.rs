//! Port for applying a generated demo dataset in one unit.
//!
//! A seed run is recorded under its seed key together with the data it
//! writes. Adapters must make the run marker and every row visible together
//! or not at all, so a failed run can be retried on the next startup.

use async_trait::async_trait;

use crate::domain::{Event, PasswordHash, Registration, SkillSet, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by example data seed repository adapters.
    pub enum ExampleDataSeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "example data seeding connection failed: {message}",
        /// Query or mutation failed; nothing from the run was kept.
        Query { message: String } => "example data seeding query failed: {message}",
    }
}

/// Whether a seed run wrote anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// The run was recorded and its data written.
    Applied,
    /// A run with the same key exists; nothing was written.
    AlreadySeeded,
}

/// Fully validated dataset for one seed run.
#[derive(Debug, Clone)]
pub struct ExampleDataSeedRequest {
    /// Seed name recorded as the run marker.
    pub seed_key: String,
    /// RNG seed the dataset was generated from.
    pub seed: u64,
    /// Shared password hash for every seeded account.
    pub password_hash: PasswordHash,
    pub users: Vec<User>,
    /// Events with their final ids already assigned.
    pub events: Vec<Event>,
    pub registrations: Vec<Registration>,
    /// Directed `(follower, followed)` edges.
    pub follows: Vec<(UserId, UserId)>,
    pub skills: Vec<(UserId, SkillSet)>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExampleDataSeedRepository: Send + Sync {
    /// Record the run and write its data, or report that the key was
    /// already applied.
    async fn seed_example_data(
        &self,
        request: ExampleDataSeedRequest,
    ) -> Result<SeedingResult, ExampleDataSeedRepositoryError>;
}
