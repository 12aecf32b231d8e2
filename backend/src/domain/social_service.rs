//! Follow, friendship and directory operations.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{
    GroupRepository, SocialCommand, SocialGraphRepository, SocialQuery, UserRepository,
};
use super::service_errors::{map_group_error, map_social_error, map_user_error};
use super::{
    Candidate, Error, Principal, SocialView, User, UserId, by_display_name, rank_candidates,
};

/// Implements [`SocialCommand`] and [`SocialQuery`].
#[derive(Clone)]
pub struct SocialService {
    users: Arc<dyn UserRepository>,
    social: Arc<dyn SocialGraphRepository>,
    groups: Arc<dyn GroupRepository>,
}

impl SocialService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        social: Arc<dyn SocialGraphRepository>,
        groups: Arc<dyn GroupRepository>,
    ) -> Self {
        Self {
            users,
            social,
            groups,
        }
    }

    fn reject_self(principal: &Principal, target: &UserId, action: &str) -> Result<(), Error> {
        if principal.user_id == *target {
            return Err(Error::invalid_request(format!("cannot {action} yourself")));
        }
        Ok(())
    }

    async fn require_user(&self, id: &UserId) -> Result<(), Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    async fn sorted_users(&self, ids: Vec<UserId>) -> Result<Vec<User>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut users = self.users.find_many(&ids).await.map_err(map_user_error)?;
        users.sort_by(by_display_name);
        Ok(users)
    }
}

#[async_trait]
impl SocialCommand for SocialService {
    async fn follow(&self, principal: &Principal, target: &UserId) -> Result<(), Error> {
        Self::reject_self(principal, target, "follow")?;
        self.require_user(target).await?;
        let created = self
            .social
            .insert_edge(&principal.user_id, target)
            .await
            .map_err(map_social_error)?;
        if created {
            info!(follower = %principal.user_id, followee = %target, "follow created");
        }
        Ok(())
    }

    async fn unfollow(&self, principal: &Principal, target: &UserId) -> Result<(), Error> {
        Self::reject_self(principal, target, "unfollow")?;
        let removed = self
            .social
            .remove_edge(&principal.user_id, target)
            .await
            .map_err(map_social_error)?;
        if removed {
            info!(follower = %principal.user_id, followee = %target, "follow removed");
        }
        Ok(())
    }

    async fn befriend(&self, principal: &Principal, target: &UserId) -> Result<(), Error> {
        Self::reject_self(principal, target, "befriend")?;
        self.require_user(target).await?;
        self.social
            .insert_mutual(&principal.user_id, target)
            .await
            .map_err(map_social_error)?;
        info!(user = %principal.user_id, friend = %target, "friendship recorded");
        Ok(())
    }
}

#[async_trait]
impl SocialQuery for SocialService {
    async fn directory(
        &self,
        principal: &Principal,
        search: Option<String>,
    ) -> Result<Vec<Candidate>, Error> {
        let viewer = &principal.user_id;
        let users = self.users.list_all().await.map_err(map_user_error)?;
        let following = self
            .social
            .outbound_edges(viewer)
            .await
            .map_err(map_social_error)?;
        let followers = self
            .social
            .inbound_edges(viewer)
            .await
            .map_err(map_social_error)?;
        let co_members = self
            .groups
            .co_members(viewer)
            .await
            .map_err(map_group_error)?;

        Ok(rank_candidates(
            viewer,
            search.as_deref(),
            &users,
            SocialView {
                following: &following,
                followers: &followers,
            },
            Some(&co_members),
        ))
    }

    async fn following(&self, principal: &Principal) -> Result<Vec<User>, Error> {
        let ids = self
            .social
            .outbound_edges(&principal.user_id)
            .await
            .map_err(map_social_error)?;
        self.sorted_users(ids.into_iter().collect()).await
    }

    async fn followers(&self, principal: &Principal) -> Result<Vec<User>, Error> {
        let ids = self
            .social
            .inbound_edges(&principal.user_id)
            .await
            .map_err(map_social_error)?;
        self.sorted_users(ids.into_iter().collect()).await
    }
}
