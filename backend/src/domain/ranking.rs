//! Event feed ranking.
//!
//! [`rank_events`] turns a snapshot of events, registrations and the viewer's
//! follows into an ordered feed. Events with at least one followed registrant
//! form the first tier; everything else forms the second. Within a tier the
//! feed is chronological, and the event id breaks remaining ties.
//!
//! The function does no I/O and cannot fail. Callers resolve the viewer and
//! surface store errors before calling it.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::{DisplayName, Event, EventId, Registration, UserId};

/// Number of connection names shown per event.
pub const CONNECTIONS_PREVIEW_MAX: usize = 3;

/// Read-only inputs for a single ranking pass.
#[derive(Debug, Clone, Copy)]
pub struct FeedSnapshot<'a> {
    /// Candidate events. Past events are dropped by the ranking itself.
    pub events: &'a [Event],
    /// Every registration in the system, in discovery order.
    pub registrations: &'a [Registration],
    /// Users the viewer follows.
    pub following: &'a HashSet<UserId>,
    /// Display names for the followed users. Followed users missing here are
    /// counted but left out of the preview.
    pub names: &'a HashMap<UserId, DisplayName>,
}

/// Event plus the viewer-specific social annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub is_registered: bool,
    /// First connections found registered, capped at
    /// [`CONNECTIONS_PREVIEW_MAX`].
    pub connections_going: Vec<DisplayName>,
    pub connections_going_count: usize,
}

impl AnnotatedEvent {
    /// Whether at least one connection is registered.
    pub fn has_connections(&self) -> bool {
        self.connections_going_count > 0
    }
}

/// Rank the feed for `viewer`.
///
/// Every followed registrant counts towards `connections_going_count`. The
/// preview only lists registrants with an entry in [`FeedSnapshot::names`],
/// so it holds `min(connections_going_count, 3)` names whenever every
/// followed user resolves and may be shorter otherwise.
///
/// # Examples
/// ```
/// use std::collections::{HashMap, HashSet};
///
/// use chrono::NaiveDate;
/// use volunteer_hub::domain::{FeedSnapshot, UserId, rank_events};
///
/// let viewer = UserId::random();
/// let today = NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid date");
/// let feed = rank_events(
///     &viewer,
///     today,
///     FeedSnapshot {
///         events: &[],
///         registrations: &[],
///         following: &HashSet::new(),
///         names: &HashMap::new(),
///     },
/// );
/// assert!(feed.is_empty());
/// ```
pub fn rank_events(
    viewer: &UserId,
    today: NaiveDate,
    snapshot: FeedSnapshot<'_>,
) -> Vec<AnnotatedEvent> {
    let registrants = registrants_by_event(snapshot.registrations);

    let mut feed: Vec<AnnotatedEvent> = snapshot
        .events
        .iter()
        .filter(|event| !event.is_past(today))
        .map(|event| {
            let users = registrants
                .get(&event.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            annotate(viewer, event.clone(), users, &snapshot)
        })
        .collect();

    feed.sort_by(|a, b| {
        b.has_connections()
            .cmp(&a.has_connections())
            .then_with(|| a.event.date.cmp(&b.event.date))
            .then_with(|| a.event.id.cmp(&b.event.id))
    });
    feed
}

fn registrants_by_event(registrations: &[Registration]) -> HashMap<EventId, Vec<UserId>> {
    let mut seen = HashSet::with_capacity(registrations.len());
    let mut by_event: HashMap<EventId, Vec<UserId>> = HashMap::new();
    for registration in registrations {
        if seen.insert(*registration) {
            by_event
                .entry(registration.event_id)
                .or_default()
                .push(registration.user_id);
        }
    }
    by_event
}

fn annotate(
    viewer: &UserId,
    event: Event,
    registrants: &[UserId],
    snapshot: &FeedSnapshot<'_>,
) -> AnnotatedEvent {
    let mut annotated = AnnotatedEvent {
        event,
        is_registered: false,
        connections_going: Vec::new(),
        connections_going_count: 0,
    };
    for registrant in registrants {
        if registrant == viewer {
            annotated.is_registered = true;
            continue;
        }
        if !snapshot.following.contains(registrant) {
            continue;
        }
        annotated.connections_going_count += 1;
        if annotated.connections_going.len() >= CONNECTIONS_PREVIEW_MAX {
            continue;
        }
        if let Some(name) = snapshot.names.get(registrant) {
            annotated.connections_going.push(name.clone());
        }
    }
    annotated
}
