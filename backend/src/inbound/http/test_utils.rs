//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header;

use crate::domain::ports::{
    AuthServiceError, MockAccountCommand, MockAuthService, MockEventCommand, MockEventQuery,
    MockGroupCommand, MockGroupQuery, MockProfileCommand, MockProfileQuery, MockSocialCommand,
    MockSocialQuery,
};
use crate::domain::Principal;

use super::state::{HttpState, HttpStatePorts};

/// Token accepted by [`MockPorts::signed_in_as`].
pub const TEST_TOKEN: &str = "test-token";

/// One mock per driving port. Tests set expectations on the fields they
/// care about and leave the rest untouched.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountCommand,
    pub events: MockEventCommand,
    pub events_query: MockEventQuery,
    pub social: MockSocialCommand,
    pub social_query: MockSocialQuery,
    pub profile: MockProfileCommand,
    pub profile_query: MockProfileQuery,
    pub groups: MockGroupCommand,
    pub groups_query: MockGroupQuery,
    pub auth: MockAuthService,
}

impl MockPorts {
    /// Mocks whose auth service resolves [`TEST_TOKEN`] to `principal`.
    pub fn signed_in_as(principal: Principal) -> Self {
        let mut ports = Self::default();
        ports.auth.expect_verify().returning(move |token| {
            if token == TEST_TOKEN {
                Ok(principal)
            } else {
                Err(AuthServiceError::invalid("unknown test token"))
            }
        });
        ports
    }

    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(self.accounts),
            events: Arc::new(self.events),
            events_query: Arc::new(self.events_query),
            social: Arc::new(self.social),
            social_query: Arc::new(self.social_query),
            profile: Arc::new(self.profile),
            profile_query: Arc::new(self.profile_query),
            groups: Arc::new(self.groups),
            groups_query: Arc::new(self.groups_query),
            auth: Arc::new(self.auth),
        })
    }
}

/// `Authorization` header carrying [`TEST_TOKEN`].
pub fn bearer() -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
}
