//! Volunteer hub backend.
//!
//! Events ranked by who you know, rosters for the organizers who own them,
//! and a people directory ordered by social proximity. See [`domain`] for the
//! engines and services, [`inbound::http`] for the REST surface and
//! [`outbound`] for the stores behind it.

pub mod doc;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
