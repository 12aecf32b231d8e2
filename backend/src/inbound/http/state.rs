//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving ports,
//! so they can be exercised against mocks without any storage behind them.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, AuthService, EventCommand, EventQuery, GroupCommand, GroupQuery,
    ProfileCommand, ProfileQuery, SocialCommand, SocialQuery,
};

/// Parameter object bundling every port the HTTP handlers call.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub events: Arc<dyn EventCommand>,
    pub events_query: Arc<dyn EventQuery>,
    pub social: Arc<dyn SocialCommand>,
    pub social_query: Arc<dyn SocialQuery>,
    pub profile: Arc<dyn ProfileCommand>,
    pub profile_query: Arc<dyn ProfileQuery>,
    pub groups: Arc<dyn GroupCommand>,
    pub groups_query: Arc<dyn GroupQuery>,
    pub auth: Arc<dyn AuthService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub events: Arc<dyn EventCommand>,
    pub events_query: Arc<dyn EventQuery>,
    pub social: Arc<dyn SocialCommand>,
    pub social_query: Arc<dyn SocialQuery>,
    pub profile: Arc<dyn ProfileCommand>,
    pub profile_query: Arc<dyn ProfileQuery>,
    pub groups: Arc<dyn GroupCommand>,
    pub groups_query: Arc<dyn GroupQuery>,
    /// Resolves bearer tokens for the [`Authenticated`] extractor.
    ///
    /// [`Authenticated`]: super::auth::Authenticated
    pub auth: Arc<dyn AuthService>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            events,
            events_query,
            social,
            social_query,
            profile,
            profile_query,
            groups,
            groups_query,
            auth,
        } = ports;
        Self {
            accounts,
            events,
            events_query,
            social,
            social_query,
            profile,
            profile_query,
            groups,
            groups_query,
            auth,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
