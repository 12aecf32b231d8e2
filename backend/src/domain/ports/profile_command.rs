//! Driving port for profile and skill updates.

use async_trait::async_trait;

use crate::domain::{DisplayName, Error, ImageUpload, Principal, SkillSet, User};

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: Option<DisplayName>,
    pub image: Option<ImageUpload>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    async fn update_profile(
        &self,
        principal: &Principal,
        update: ProfileUpdate,
    ) -> Result<User, Error>;

    /// Replace the caller's skills wholesale.
    async fn replace_skills(
        &self,
        principal: &Principal,
        skills: SkillSet,
    ) -> Result<SkillSet, Error>;
}
