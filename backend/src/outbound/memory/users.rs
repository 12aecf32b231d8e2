//! Identity store backed by a map keyed by user id.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{StoredCredentials, UserRepository, UserRepositoryError};
use crate::domain::{Email, PasswordHash, User, UserId};

#[derive(Default)]
pub struct MemoryUserStore {
    pub(super) accounts: RwLock<HashMap<UserId, StoredCredentials>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|stored| stored.user.email() == user.email())
        {
            return Err(UserRepositoryError::duplicate_email(user.email().as_ref()));
        }
        accounts.insert(
            *user.id(),
            StoredCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(id).map(|stored| stored.user.clone()))
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| accounts.get(id).map(|stored| stored.user.clone()))
            .collect())
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|stored| stored.user.email() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().map(|stored| stored.user.clone()).collect())
    }

    async fn update_profile(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut accounts = self.accounts.write().await;
        let Some(stored) = accounts.get_mut(user.id()) else {
            return Ok(false);
        };
        let mut updated = stored.user.clone();
        updated.rename(user.display_name().clone());
        stored.user = updated.with_profile_image_url(user.profile_image_url().map(str::to_owned));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Role};
    use rstest::{fixture, rstest};

    fn account(name: &str, email: &str) -> User {
        User::new(
            UserId::random(),
            DisplayName::new(name).expect("name"),
            Email::new(email).expect("email"),
            Role::Volunteer,
        )
    }

    #[fixture]
    fn store() -> MemoryUserStore {
        MemoryUserStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_emails_are_rejected(store: MemoryUserStore) {
        let hash = PasswordHash::new("h");
        store
            .insert(&account("Ada", "ada@example.org"), &hash)
            .await
            .expect("first insert");

        let err = store
            .insert(&account("Other Ada", "ADA@example.org"), &hash)
            .await
            .expect_err("duplicate");

        assert!(matches!(err, UserRepositoryError::DuplicateEmail { .. }));
        assert_eq!(store.list_all().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn credentials_are_found_by_email(store: MemoryUserStore) {
        let ada = account("Ada", "ada@example.org");
        store
            .insert(&ada, &PasswordHash::new("secret-hash"))
            .await
            .expect("insert");

        let found = store
            .find_credentials(&Email::new("ada@example.org").expect("email"))
            .await
            .expect("lookup")
            .expect("present");

        assert_eq!(found.user, ada);
        assert_eq!(found.password_hash.as_ref(), "secret-hash");
    }

    #[rstest]
    #[tokio::test]
    async fn find_many_skips_unknown_ids(store: MemoryUserStore) {
        let ada = account("Ada", "ada@example.org");
        store
            .insert(&ada, &PasswordHash::new("h"))
            .await
            .expect("insert");

        let found = store
            .find_many(&[UserId::random(), *ada.id()])
            .await
            .expect("lookup");

        assert_eq!(found, vec![ada]);
    }

    #[rstest]
    #[tokio::test]
    async fn profile_updates_keep_email_and_role(store: MemoryUserStore) {
        let ada = account("Ada", "ada@example.org");
        store
            .insert(&ada, &PasswordHash::new("h"))
            .await
            .expect("insert");
        let mut renamed = ada.clone().with_profile_image_url(Some("/u/a.png".into()));
        renamed.rename(DisplayName::new("Countess").expect("name"));

        assert!(store.update_profile(&renamed).await.expect("update"));
        let stored = store
            .find_by_id(ada.id())
            .await
            .expect("lookup")
            .expect("present");

        assert_eq!(stored.display_name().as_ref(), "Countess");
        assert_eq!(stored.profile_image_url(), Some("/u/a.png"));
        assert_eq!(stored.email(), ada.email());
    }

    #[rstest]
    #[tokio::test]
    async fn updating_unknown_accounts_reports_false(store: MemoryUserStore) {
        let ghost = account("Ghost", "ghost@example.org");
        assert!(!store.update_profile(&ghost).await.expect("update"));
    }
}
