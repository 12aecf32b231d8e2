//! In-process implementations of the driven store ports.
//!
//! Used when no database URL is configured and by integration tests. Each
//! store guards its tables with a single [`tokio::sync::RwLock`], so a
//! multi-row write such as [`MemorySocialGraph::insert_mutual`] is observed
//! either completely or not at all.

mod events;
mod groups;
mod seed;
mod skills;
mod social;
mod users;

pub use events::{MemoryEventStore, MemoryRegistrationStore};
pub use groups::MemoryGroupStore;
pub use seed::MemoryExampleDataSeeder;
pub use skills::MemorySkillStore;
pub use social::MemorySocialGraph;
pub use users::MemoryUserStore;
