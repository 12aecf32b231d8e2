//! Group creation and membership.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{GroupCommand, GroupQuery, GroupRepository};
use super::service_errors::map_group_error;
use super::{Error, Group, GroupId, GroupName, Principal, sort_groups_by_name};

/// Implements [`GroupCommand`] and [`GroupQuery`].
#[derive(Clone)]
pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    async fn require_group(&self, group_id: &GroupId) -> Result<Group, Error> {
        self.groups
            .find_by_id(group_id)
            .await
            .map_err(map_group_error)?
            .ok_or_else(|| Error::not_found(format!("group {group_id} not found")))
    }
}

#[async_trait]
impl GroupCommand for GroupService {
    async fn create_group(&self, principal: &Principal, name: GroupName) -> Result<Group, Error> {
        let group = Group::new(GroupId::random(), name, principal.user_id);
        self.groups.insert(&group).await.map_err(map_group_error)?;
        info!(group_id = %group.id, creator = %principal.user_id, "group created");
        Ok(group)
    }

    async fn join_group(&self, principal: &Principal, group_id: &GroupId) -> Result<(), Error> {
        self.require_group(group_id).await?;
        self.groups
            .add_member(group_id, &principal.user_id)
            .await
            .map_err(map_group_error)?;
        Ok(())
    }

    async fn leave_group(&self, principal: &Principal, group_id: &GroupId) -> Result<(), Error> {
        self.require_group(group_id).await?;
        self.groups
            .remove_member(group_id, &principal.user_id)
            .await
            .map_err(map_group_error)?;
        Ok(())
    }
}

#[async_trait]
impl GroupQuery for GroupService {
    async fn my_groups(&self, principal: &Principal) -> Result<Vec<Group>, Error> {
        let mut groups = self
            .groups
            .groups_for(&principal.user_id)
            .await
            .map_err(map_group_error)?;
        sort_groups_by_name(&mut groups);
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockGroupRepository;
    use crate::domain::{ErrorCode, Role, UserId};
    use rstest::rstest;

    fn principal() -> Principal {
        Principal::new(UserId::random(), Role::Volunteer)
    }

    #[rstest]
    #[tokio::test]
    async fn create_records_the_creator() {
        let me = principal();
        let mut groups = MockGroupRepository::new();
        groups
            .expect_insert()
            .withf(move |group| group.created_by == me.user_id)
            .times(1)
            .return_once(|_| Ok(()));

        let group = GroupService::new(Arc::new(groups))
            .create_group(&me, GroupName::new("Litter pickers").expect("name"))
            .await
            .expect("group created");

        assert_eq!(group.name.as_ref(), "Litter pickers");
    }

    #[rstest]
    #[tokio::test]
    async fn joining_unknown_groups_is_not_found() {
        let mut groups = MockGroupRepository::new();
        groups.expect_find_by_id().return_once(|_| Ok(None));
        groups.expect_add_member().never();

        let error = GroupService::new(Arc::new(groups))
            .join_group(&principal(), &GroupId::random())
            .await
            .expect_err("unknown group");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn leaving_is_idempotent(#[case] was_member: bool) {
        let me = principal();
        let group = Group::new(
            GroupId::random(),
            GroupName::new("Choir").expect("name"),
            UserId::random(),
        );
        let group_id = group.id;
        let mut groups = MockGroupRepository::new();
        groups
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(group)));
        groups
            .expect_remove_member()
            .return_once(move |_, _| Ok(was_member));

        let result = GroupService::new(Arc::new(groups))
            .leave_group(&me, &group_id)
            .await;

        assert!(result.is_ok());
    }
}
