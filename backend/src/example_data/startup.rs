//! Startup seeding: load the registry, generate a dataset and hand it to the
//! seed port as one unit.
//!
//! Seeding is idempotent per seed name. The port records each applied seed
//! alongside its data, so a run that fails part way leaves nothing behind
//! and is retried on the next startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use chrono::{Days, NaiveDate};
use example_data::{
    ExampleData, ExampleEvent, ExampleUser, GenerationError, RegistryError, RoleSeed,
    SeedRegistry, generate_example_data,
};
use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    ExampleDataSeedRepository, ExampleDataSeedRequest, PasswordHasher, SeedingResult,
};
use crate::domain::{
    DisplayName, Email, Event, EventDraft, EventId, NewEvent, PasswordHash, Registration, Role,
    SkillSet, User, UserId,
};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while seeding at startup.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    /// A generated record failed domain validation.
    #[error("generated record rejected: {0}")]
    InvalidRecord(String),
    /// The seed port or the password hasher failed.
    #[error("failed to write example data: {0}")]
    Store(String),
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Collaborators the seeder writes through.
#[derive(Clone)]
pub struct SeedTargets {
    pub seeds: Arc<dyn ExampleDataSeedRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
}

/// Summary of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    pub seed_name: String,
    pub result: SeedingResult,
    pub user_count: usize,
    pub event_count: usize,
}

/// Seed demo data when enabled.
///
/// # Examples
///
/// ```ignore
/// # use volunteer_hub::example_data::{ExampleDataSettings, SeedTargets, seed_example_data_on_startup};
/// # async fn run(targets: SeedTargets) -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ExampleDataSettings {
///     enabled: false,
///     seed_name: None,
///     count: None,
///     registry_path: None,
///     password: None,
/// };
/// let outcome = seed_example_data_on_startup(&settings, &targets, &mockable::DefaultClock).await?;
/// assert!(outcome.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_data_on_startup(
    settings: &ExampleDataSettings,
    targets: &SeedTargets,
    clock: &dyn Clock,
) -> Result<Option<SeedOutcome>, StartupSeedingError> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry = load_registry(&settings.registry_path())?;
    let seed = registry.find_seed(seed_name)?;
    let seed = match settings.count {
        Some(count) => seed.with_volunteer_count(count),
        None => seed.clone(),
    };
    let data = generate_example_data(&seed)?;
    let today = clock.utc().date_naive();

    let password_hash = targets
        .hasher
        .hash(settings.password())
        .await
        .map_err(store_error)?;
    let request = build_request(seed_name, seed.seed(), &data, password_hash, today)?;
    let (user_count, event_count) = (request.users.len(), request.events.len());
    let result = targets
        .seeds
        .seed_example_data(request)
        .await
        .map_err(store_error)?;
    let outcome = SeedOutcome {
        seed_name: seed_name.to_owned(),
        result,
        user_count,
        event_count,
    };
    match outcome.result {
        SeedingResult::Applied => info!(
            seed_name = %outcome.seed_name,
            user_count = outcome.user_count,
            event_count = outcome.event_count,
            "example data seeding applied"
        ),
        SeedingResult::AlreadySeeded => info!(
            seed_name = %outcome.seed_name,
            "example data seed already applied; skipping"
        ),
    }
    Ok(Some(outcome))
}

fn store_error(err: impl std::fmt::Display) -> StartupSeedingError {
    StartupSeedingError::Store(err.to_string())
}

fn invalid(err: impl std::fmt::Display) -> StartupSeedingError {
    StartupSeedingError::InvalidRecord(err.to_string())
}

fn to_user(seed: &ExampleUser) -> Result<User, StartupSeedingError> {
    let role = match seed.role {
        RoleSeed::Organizer => Role::Organizer,
        RoleSeed::Volunteer => Role::Volunteer,
    };
    Ok(User::new(
        UserId::from_uuid(seed.id),
        DisplayName::new(seed.display_name.as_str()).map_err(invalid)?,
        Email::new(&seed.email).map_err(invalid)?,
        role,
    ))
}

fn to_new_event(seed: &ExampleEvent, today: NaiveDate) -> Result<NewEvent, StartupSeedingError> {
    let date = today
        .checked_add_days(Days::new(u64::from(seed.days_from_base)))
        .ok_or_else(|| invalid("event date out of range"))?;
    let draft = EventDraft::try_from_parts(
        &seed.name,
        &date.format("%Y-%m-%d").to_string(),
        &seed.description,
        seed.location_address.as_deref(),
    )
    .map_err(invalid)?;
    Ok(NewEvent {
        draft,
        organizer_id: UserId::from_uuid(seed.organizer_id),
        image_url: None,
    })
}

fn build_request(
    seed_name: &str,
    seed: u64,
    data: &ExampleData,
    password_hash: PasswordHash,
    today: NaiveDate,
) -> Result<ExampleDataSeedRequest, StartupSeedingError> {
    let users = data
        .users
        .iter()
        .map(to_user)
        .collect::<Result<Vec<_>, _>>()?;

    let mut event_ids: HashMap<Uuid, EventId> = HashMap::with_capacity(data.events.len());
    let mut events = Vec::with_capacity(data.events.len());
    for generated in &data.events {
        let event = Event::from_new(EventId::random(), to_new_event(generated, today)?);
        event_ids.insert(generated.id, event.id);
        events.push(event);
    }

    let registrations = data
        .registrations
        .iter()
        .filter_map(|registration| {
            let Some(event_id) = event_ids.get(&registration.event_id) else {
                warn!(event_id = %registration.event_id, "registration for unknown generated event");
                return None;
            };
            Some(Registration::new(
                UserId::from_uuid(registration.user_id),
                *event_id,
            ))
        })
        .collect();

    let follows = data
        .follows
        .iter()
        .map(|follow| {
            (
                UserId::from_uuid(follow.follower_id),
                UserId::from_uuid(follow.followed_id),
            )
        })
        .collect();

    let skills = data
        .skills
        .iter()
        .map(|entry| {
            SkillSet::parse(entry.skills.iter())
                .map(|set| (UserId::from_uuid(entry.user_id), set))
                .map_err(invalid)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExampleDataSeedRequest {
        seed_key: seed_name.to_owned(),
        seed,
        password_hash,
        users,
        events,
        registrations,
        follows,
        skills,
    })
}

fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let read_error = |source: std::io::Error| StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(SeedRegistry::from_json(&contents)?)
}
