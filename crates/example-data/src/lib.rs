//! Deterministic demo data for the volunteer hub.
//!
//! A JSON seed registry names reproducible datasets. Each seed expands into
//! volunteers and organizers, upcoming events, registrations, follow edges and
//! skills drawn from [`SKILL_CATALOGUE`]. The crate has no dependency on the
//! backend; the backend maps these records into its own domain types.
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_data};
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{
//!         "name": "quiet-heron",
//!         "seed": 7,
//!         "volunteerCount": 6,
//!         "organizerCount": 2,
//!         "eventCount": 4
//!     }]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed = registry.find_seed("quiet-heron").expect("seed exists");
//! let data = generate_example_data(seed).expect("generation succeeds");
//!
//! assert_eq!(data.users.len(), 8);
//! assert_eq!(data.events.len(), 4);
//! ```

mod catalogue;
mod error;
mod generator;
mod names;
mod registry;
mod seed;

pub use catalogue::SKILL_CATALOGUE;
pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_data;
pub use names::{DISPLAY_NAME_MAX, DISPLAY_NAME_MIN, is_valid_display_name};
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{
    ExampleData, ExampleEvent, ExampleFollow, ExampleRegistration, ExampleSkills, ExampleUser,
    RoleSeed,
};
