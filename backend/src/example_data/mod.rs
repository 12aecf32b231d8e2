//! Demo data seeding at startup, enabled by the `example-data` feature.

mod config;
mod startup;

pub use crate::domain::ports::SeedingResult;
pub use config::ExampleDataSettings;
pub use startup::{SeedOutcome, SeedTargets, StartupSeedingError, seed_example_data_on_startup};
