//! Demo data seeding across the in-memory stores.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    ExampleDataSeedRepository, ExampleDataSeedRepositoryError, ExampleDataSeedRequest,
    SeedingResult, StoredCredentials,
};

use super::{
    MemoryEventStore, MemoryRegistrationStore, MemorySkillStore, MemorySocialGraph,
    MemoryUserStore,
};

/// Applies a seed to shared memory stores.
///
/// All tables are write-locked for the whole run and the request is checked
/// before anything is written, so a rejected run leaves no partial data and
/// no run marker behind.
pub struct MemoryExampleDataSeeder {
    users: Arc<MemoryUserStore>,
    events: Arc<MemoryEventStore>,
    registrations: Arc<MemoryRegistrationStore>,
    social: Arc<MemorySocialGraph>,
    skills: Arc<MemorySkillStore>,
    runs: Mutex<HashSet<String>>,
}

impl MemoryExampleDataSeeder {
    pub fn new(
        users: Arc<MemoryUserStore>,
        events: Arc<MemoryEventStore>,
        registrations: Arc<MemoryRegistrationStore>,
        social: Arc<MemorySocialGraph>,
        skills: Arc<MemorySkillStore>,
    ) -> Self {
        Self {
            users,
            events,
            registrations,
            social,
            skills,
            runs: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl ExampleDataSeedRepository for MemoryExampleDataSeeder {
    async fn seed_example_data(
        &self,
        request: ExampleDataSeedRequest,
    ) -> Result<SeedingResult, ExampleDataSeedRepositoryError> {
        let mut runs = self.runs.lock().await;
        if runs.contains(&request.seed_key) {
            return Ok(SeedingResult::AlreadySeeded);
        }

        // Lock order: users, events, registrations, social, skills.
        let mut accounts = self.users.accounts.write().await;
        let mut events = self.events.events.write().await;
        let mut registrations = self.registrations.registrations.write().await;
        let mut edges = self.social.edges.write().await;
        let mut skills = self.skills.skills.write().await;

        let mut emails: HashSet<&str> = accounts
            .values()
            .map(|stored| stored.user.email().as_ref())
            .collect();
        for user in &request.users {
            if accounts.contains_key(user.id()) || !emails.insert(user.email().as_ref()) {
                return Err(ExampleDataSeedRepositoryError::query(format!(
                    "account {} already exists",
                    user.email().as_ref()
                )));
            }
        }
        if let Some(event) = request.events.iter().find(|event| events.contains_key(&event.id)) {
            return Err(ExampleDataSeedRepositoryError::query(format!(
                "event {} already exists",
                event.id
            )));
        }

        for user in &request.users {
            accounts.insert(
                *user.id(),
                StoredCredentials {
                    user: user.clone(),
                    password_hash: request.password_hash.clone(),
                },
            );
        }
        for event in &request.events {
            events.insert(event.id, event.clone());
        }
        for registration in &request.registrations {
            if !registrations.contains(registration) {
                registrations.push(*registration);
            }
        }
        edges.extend(request.follows.iter().copied());
        for (user_id, set) in &request.skills {
            if !set.is_empty() {
                skills.insert(*user_id, set.clone());
            }
        }

        runs.insert(request.seed_key);
        Ok(SeedingResult::Applied)
    }
}
