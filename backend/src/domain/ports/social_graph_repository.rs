//! Social graph store port.
//!
//! Edges are directed: `from` follows `to`. A friendship is two edges written
//! together by [`SocialGraphRepository::insert_mutual`].

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by social graph adapters.
    pub enum SocialGraphRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "social graph connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "social graph query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraphRepository: Send + Sync {
    /// Users that `user_id` follows.
    async fn outbound_edges(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<UserId>, SocialGraphRepositoryError>;

    /// Users following `user_id`.
    async fn inbound_edges(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<UserId>, SocialGraphRepositoryError>;

    /// Add `from -> to`. Returns `false` if the edge already existed.
    async fn insert_edge(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<bool, SocialGraphRepositoryError>;

    /// Remove `from -> to`. Returns `false` if there was no such edge.
    async fn remove_edge(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<bool, SocialGraphRepositoryError>;

    /// Add both `a -> b` and `b -> a`, or neither on failure.
    async fn insert_mutual(&self, a: &UserId, b: &UserId)
        -> Result<(), SocialGraphRepositoryError>;
}
