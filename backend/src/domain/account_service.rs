//! Account registration and login.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::ports::{AccountCommand, AuthService, LoginSession, PasswordHasher, UserRepository};
use super::service_errors::{map_auth_error, map_hasher_error, map_user_error};
use super::{Error, LoginCredentials, SignUp, User, UserId};

/// Implements [`AccountCommand`] over the identity store and credential
/// adapters.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    auth: Arc<dyn AuthService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            users,
            hasher,
            auth,
        }
    }

    fn invalid_credentials() -> Error {
        Error::unauthorized("invalid credentials")
    }
}

#[async_trait]
impl AccountCommand for AccountService {
    async fn register(&self, form: SignUp) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(form.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            form.display_name().clone(),
            form.email().clone(),
            form.role(),
        );
        self.users
            .insert(&user, &password_hash)
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id(), role = %user.role(), "account registered");
        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginSession, Error> {
        let Some(stored) = self
            .users
            .find_credentials(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login attempt for unknown email");
            return Err(Self::invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            debug!(user_id = %stored.user.id(), "login attempt with wrong password");
            return Err(Self::invalid_credentials());
        }

        let token = self
            .auth
            .issue(stored.user.id(), stored.user.role())
            .map_err(map_auth_error)?;
        Ok(LoginSession {
            token,
            user: stored.user,
        })
    }
}
