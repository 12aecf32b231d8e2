//! Request correlation identifier carried in task-local storage.
//!
//! The HTTP middleware opens a scope per request; anything running inside it
//! (services, error constructors, log statements) can read the identifier via
//! [`TraceId::current`]. Spawned tasks do not inherit the scope, so wrap them
//! with [`TraceId::scope`] explicitly.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use volunteer_hub::TraceId;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let id: TraceId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse a caller-supplied identifier when it is a well-formed UUID.
    #[must_use]
    pub fn from_header_value(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// The identifier in scope for the current task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn current_is_none_outside_a_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn scope_exposes_the_identifier() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[rstest]
    #[case("00000000-0000-0000-0000-000000000001", true)]
    #[case("  00000000-0000-0000-0000-000000000001 ", true)]
    #[case("not-a-uuid", false)]
    #[case("", false)]
    fn header_values_must_be_uuids(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(TraceId::from_header_value(raw).is_some(), accepted);
    }
}
