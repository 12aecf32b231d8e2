//! Profile and skill management for the signed-in user.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{
    BlobStore, ProfileCommand, ProfileQuery, ProfileUpdate, SkillRepository, UserRepository,
};
use super::service_errors::{map_blob_error, map_skill_error, map_user_error};
use super::{Error, Principal, SkillSet, User};

/// Implements [`ProfileCommand`] and [`ProfileQuery`].
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    skills: Arc<dyn SkillRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl ProfileService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        skills: Arc<dyn SkillRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            users,
            skills,
            blobs,
        }
    }

    async fn current_user(&self, principal: &Principal) -> Result<User, Error> {
        self.users
            .find_by_id(&principal.user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("account no longer exists"))
    }
}

#[async_trait]
impl ProfileQuery for ProfileService {
    async fn profile(&self, principal: &Principal) -> Result<User, Error> {
        self.current_user(principal).await
    }

    async fn skills(&self, principal: &Principal) -> Result<SkillSet, Error> {
        self.skills
            .get(&principal.user_id)
            .await
            .map_err(map_skill_error)
    }
}

#[async_trait]
impl ProfileCommand for ProfileService {
    async fn update_profile(
        &self,
        principal: &Principal,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        let mut user = self.current_user(principal).await?;
        let ProfileUpdate {
            display_name,
            image,
        } = update;

        if let Some(name) = display_name {
            user.rename(name);
        }
        if let Some(upload) = image {
            let url = self.blobs.save(&upload).await.map_err(map_blob_error)?;
            user = user.with_profile_image_url(Some(url));
        }

        let updated = self
            .users
            .update_profile(&user)
            .await
            .map_err(map_user_error)?;
        if !updated {
            return Err(Error::not_found("account no longer exists"));
        }
        info!(user_id = %principal.user_id, "profile updated");
        Ok(user)
    }

    async fn replace_skills(
        &self,
        principal: &Principal,
        skills: SkillSet,
    ) -> Result<SkillSet, Error> {
        self.skills
            .replace_all(&principal.user_id, &skills)
            .await
            .map_err(map_skill_error)?;
        info!(user_id = %principal.user_id, count = skills.len(), "skills replaced");
        Ok(skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockBlobStore, MockSkillRepository, MockUserRepository};
    use crate::domain::{DisplayName, Email, ErrorCode, ImageUpload, Role, UserId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn account() -> User {
        User::new(
            UserId::random(),
            DisplayName::new("Grace Hopper").expect("name"),
            Email::new("grace@example.org").expect("email"),
            Role::Volunteer,
        )
    }

    fn service(
        users: MockUserRepository,
        skills: MockSkillRepository,
        blobs: MockBlobStore,
    ) -> ProfileService {
        ProfileService::new(Arc::new(users), Arc::new(skills), Arc::new(blobs))
    }

    #[rstest]
    #[tokio::test]
    async fn update_renames_and_stores_image(account: User) {
        let principal = Principal::new(*account.id(), account.role());
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(account)));
        users
            .expect_update_profile()
            .withf(|user| {
                user.display_name().as_ref() == "Amazing Grace"
                    && user.profile_image_url() == Some("/uploads/g.webp")
            })
            .return_once(|_| Ok(true));
        let mut blobs = MockBlobStore::new();
        blobs
            .expect_save()
            .return_once(|_| Ok("/uploads/g.webp".to_owned()));

        let user = service(users, MockSkillRepository::new(), blobs)
            .update_profile(
                &principal,
                ProfileUpdate {
                    display_name: Some(DisplayName::new("Amazing Grace").expect("name")),
                    image: Some(ImageUpload::new(vec![7], "webp").expect("upload")),
                },
            )
            .await
            .expect("update succeeds");

        assert_eq!(user.display_name().as_ref(), "Amazing Grace");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_accounts_are_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));

        let error = service(users, MockSkillRepository::new(), MockBlobStore::new())
            .profile(&Principal::new(UserId::random(), Role::Volunteer))
            .await
            .expect_err("missing");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn replace_skills_writes_the_whole_set(account: User) {
        let principal = Principal::new(*account.id(), account.role());
        let mut skills = MockSkillRepository::new();
        skills
            .expect_replace_all()
            .withf(|_, set| set.names() == vec!["Cooking", "Driving"])
            .times(1)
            .return_once(|_, _| Ok(()));
        let requested = SkillSet::parse(["Driving", "Cooking", "Driving"]).expect("skills");

        let stored = service(MockUserRepository::new(), skills, MockBlobStore::new())
            .replace_skills(&principal, requested)
            .await
            .expect("replace succeeds");

        assert_eq!(stored.len(), 2);
    }
}
