//! Groups and their memberships.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{GroupRepository, GroupRepositoryError};
use crate::domain::{Group, GroupId, UserId};

#[derive(Default)]
struct Tables {
    groups: BTreeMap<GroupId, Group>,
    members: HashSet<(GroupId, UserId)>,
}

#[derive(Default)]
pub struct MemoryGroupStore {
    tables: RwLock<Tables>,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupRepository for MemoryGroupStore {
    async fn insert(&self, group: &Group) -> Result<(), GroupRepositoryError> {
        let mut tables = self.tables.write().await;
        tables.groups.insert(group.id, group.clone());
        tables.members.insert((group.id, group.created_by));
        Ok(())
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, GroupRepositoryError> {
        Ok(self.tables.read().await.groups.get(id).cloned())
    }

    async fn add_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<bool, GroupRepositoryError> {
        Ok(self.tables.write().await.members.insert((*group_id, *user_id)))
    }

    async fn remove_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<bool, GroupRepositoryError> {
        Ok(self
            .tables
            .write()
            .await
            .members
            .remove(&(*group_id, *user_id)))
    }

    async fn groups_for(&self, user_id: &UserId) -> Result<Vec<Group>, GroupRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .iter()
            .filter(|(_, member)| member == user_id)
            .filter_map(|(group_id, _)| tables.groups.get(group_id).cloned())
            .collect())
    }

    async fn co_members(&self, user_id: &UserId) -> Result<HashSet<UserId>, GroupRepositoryError> {
        let tables = self.tables.read().await;
        let mine: HashSet<GroupId> = tables
            .members
            .iter()
            .filter(|(_, member)| member == user_id)
            .map(|(group_id, _)| *group_id)
            .collect();
        Ok(tables
            .members
            .iter()
            .filter(|(group_id, member)| mine.contains(group_id) && member != user_id)
            .map(|(_, member)| *member)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GroupName;
    use rstest::rstest;

    fn group(name: &str, creator: UserId) -> Group {
        Group::new(GroupId::random(), GroupName::new(name).expect("name"), creator)
    }

    #[rstest]
    #[tokio::test]
    async fn creators_are_enrolled() {
        let store = MemoryGroupStore::new();
        let ada = UserId::random();
        let choir = group("Choir", ada);

        store.insert(&choir).await.expect("insert");

        assert_eq!(store.groups_for(&ada).await.expect("groups"), vec![choir.clone()]);
        assert!(!store.add_member(&choir.id, &ada).await.expect("repeat"));
    }

    #[rstest]
    #[tokio::test]
    async fn co_members_span_groups_and_exclude_self() {
        let store = MemoryGroupStore::new();
        let (ada, bea, cy, dee) = (
            UserId::random(),
            UserId::random(),
            UserId::random(),
            UserId::random(),
        );
        let choir = group("Choir", ada);
        let chess = group("Chess", cy);
        store.insert(&choir).await.expect("insert");
        store.insert(&chess).await.expect("insert");
        store.add_member(&choir.id, &bea).await.expect("join");
        store.add_member(&chess.id, &ada).await.expect("join");
        store.add_member(&chess.id, &dee).await.expect("join");
        store.remove_member(&chess.id, &dee).await.expect("leave");

        assert_eq!(
            store.co_members(&ada).await.expect("co-members"),
            HashSet::from([bea, cy])
        );
    }
}
