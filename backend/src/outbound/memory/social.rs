//! Directed follow graph.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::UserId;
use crate::domain::ports::{SocialGraphRepository, SocialGraphRepositoryError};

#[derive(Default)]
pub struct MemorySocialGraph {
    pub(super) edges: RwLock<HashSet<(UserId, UserId)>>,
}

impl MemorySocialGraph {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SocialGraphRepository for MemorySocialGraph {
    async fn outbound_edges(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<UserId>, SocialGraphRepositoryError> {
        let edges = self.edges.read().await;
        Ok(edges
            .iter()
            .filter(|(from, _)| from == user_id)
            .map(|(_, to)| *to)
            .collect())
    }

    async fn inbound_edges(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<UserId>, SocialGraphRepositoryError> {
        let edges = self.edges.read().await;
        Ok(edges
            .iter()
            .filter(|(_, to)| to == user_id)
            .map(|(from, _)| *from)
            .collect())
    }

    async fn insert_edge(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<bool, SocialGraphRepositoryError> {
        Ok(self.edges.write().await.insert((*from, *to)))
    }

    async fn remove_edge(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<bool, SocialGraphRepositoryError> {
        Ok(self.edges.write().await.remove(&(*from, *to)))
    }

    async fn insert_mutual(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<(), SocialGraphRepositoryError> {
        let mut edges = self.edges.write().await;
        edges.insert((*a, *b));
        edges.insert((*b, *a));
        Ok(())
    }
}
