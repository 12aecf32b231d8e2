//! Registration store port.

use async_trait::async_trait;

use crate::domain::{EventId, Registration, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by registration store adapters.
    pub enum RegistrationRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "registration repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "registration repository query failed: {message}",
    }
}

/// Persistence contract for event registrations.
///
/// Listings return registrations in the order they were created.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Registration>, RegistrationRepositoryError>;

    /// Insert the registration unless it already exists.
    ///
    /// Returns `false` when the pair was already present.
    async fn insert_if_absent(
        &self,
        registration: &Registration,
    ) -> Result<bool, RegistrationRepositoryError>;

    async fn list_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError>;

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError>;
}
