//! People directory ranking.
//!
//! Suggests users to follow. Candidates sharing a group with the viewer rank
//! ahead of everyone else when group data is supplied; display name orders
//! the rest.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use super::{User, UserId};

/// Viewer's edges in both directions.
#[derive(Debug, Clone, Copy)]
pub struct SocialView<'a> {
    /// Users the viewer follows; they are excluded from suggestions.
    pub following: &'a HashSet<UserId>,
    /// Users following the viewer.
    pub followers: &'a HashSet<UserId>,
}

/// A suggested user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(flatten)]
    pub user: User,
    /// Whether the candidate already follows the viewer.
    pub is_followed: bool,
    pub shares_group: bool,
}

/// Rank directory candidates for `viewer`.
///
/// `search` is matched case-insensitively against display name and email; a
/// blank term matches everyone. `co_members` holds the users sharing at least
/// one group with the viewer. When it is `None` the group tier is skipped.
pub fn rank_candidates(
    viewer: &UserId,
    search: Option<&str>,
    users: &[User],
    graph: SocialView<'_>,
    co_members: Option<&HashSet<UserId>>,
) -> Vec<Candidate> {
    let needle = search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    let mut candidates: Vec<Candidate> = users
        .iter()
        .filter(|user| user.id() != viewer && !graph.following.contains(user.id()))
        .filter(|user| needle.as_deref().is_none_or(|term| matches_term(user, term)))
        .map(|user| Candidate {
            user: user.clone(),
            is_followed: graph.followers.contains(user.id()),
            shares_group: co_members.is_some_and(|members| members.contains(user.id())),
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.shares_group
            .cmp(&a.shares_group)
            .then_with(|| by_display_name(&a.user, &b.user))
    });
    candidates
}

/// Order users by case-folded display name, then exact name, then id.
pub fn by_display_name(a: &User, b: &User) -> Ordering {
    a.display_name()
        .folded()
        .cmp(&b.display_name().folded())
        .then_with(|| a.display_name().cmp(b.display_name()))
        .then_with(|| a.id().cmp(b.id()))
}

fn matches_term(user: &User, term: &str) -> bool {
    user.display_name().folded().contains(term) || user.email().as_ref().contains(term)
}
