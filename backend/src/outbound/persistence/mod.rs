//! PostgreSQL adapters for the driven store ports.
//!
//! Row structs and table definitions stay private to this module; every
//! repository translates rows back through the domain constructors and maps
//! failures with [`error_mapping`]. Connections come from a shared [`DbPool`].
//!
//! ```ignore
//! use volunteer_hub::outbound::persistence::{DbPool, DieselEventRepository, PoolConfig};
//!
//! run_pending_migrations(&url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let events = DieselEventRepository::new(pool.clone());
//! ```

mod diesel_event_repository;
mod diesel_example_data_seed_repository;
mod diesel_group_repository;
mod diesel_registration_repository;
mod diesel_skill_repository;
mod diesel_social_graph_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_event_repository::DieselEventRepository;
pub use diesel_example_data_seed_repository::DieselExampleDataSeedRepository;
pub use diesel_group_repository::DieselGroupRepository;
pub use diesel_registration_repository::DieselRegistrationRepository;
pub use diesel_skill_repository::DieselSkillRepository;
pub use diesel_social_graph_repository::DieselSocialGraphRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
