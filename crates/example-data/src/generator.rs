//! Deterministic expansion of a seed definition into records.
//!
//! A single `ChaCha8Rng` seeded from the definition drives every choice, so
//! the same definition always yields identical data.

use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StreetName};
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::catalogue::{EVENT_ACTIVITIES, EVENT_PURPOSES, SKILL_CATALOGUE};
use crate::error::GenerationError;
use crate::names::{derive_email, is_valid_display_name, sanitise_display_name};
use crate::registry::SeedDefinition;
use crate::seed::{
    ExampleData, ExampleEvent, ExampleFollow, ExampleRegistration, ExampleSkills, ExampleUser,
    RoleSeed,
};

const MAX_NAME_ATTEMPTS: usize = 100;
const MAX_REGISTRATIONS_PER_VOLUNTEER: usize = 3;
const MAX_FOLLOWS_PER_USER: usize = 4;
const MAX_SKILLS_PER_USER: usize = 3;
const EVENT_HORIZON_DAYS: u32 = 60;
/// Chance (out of ten) that an event has a street address.
const ADDRESS_ODDS: u32 = 8;

/// Expand `seed_def` into users, events, registrations, follows and skills.
///
/// Event dates are expressed as `days_from_base` in `1..=60`, so anchoring
/// them to today's date always yields upcoming events.
///
/// # Errors
///
/// Returns [`GenerationError::DisplayNameGenerationFailed`] if no valid
/// display name could be produced for a user.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_data};
///
/// let json = r#"{"version": 1, "seeds": [
///     {"name": "test", "seed": 42, "volunteerCount": 3, "organizerCount": 1, "eventCount": 2}
/// ]}"#;
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed = registry.find_seed("test").expect("found");
///
/// let first = generate_example_data(seed).expect("generated");
/// let second = generate_example_data(seed).expect("generated");
/// assert_eq!(first, second);
/// ```
pub fn generate_example_data(seed_def: &SeedDefinition) -> Result<ExampleData, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());

    let mut users = Vec::with_capacity(seed_def.organizer_count() + seed_def.volunteer_count());
    for _ in 0..seed_def.organizer_count() {
        users.push(generate_user(&mut rng, RoleSeed::Organizer, users.len())?);
    }
    for _ in 0..seed_def.volunteer_count() {
        users.push(generate_user(&mut rng, RoleSeed::Volunteer, users.len())?);
    }

    let organizer_ids: Vec<Uuid> = users
        .iter()
        .filter(|user| user.role == RoleSeed::Organizer)
        .map(|user| user.id)
        .collect();
    let events: Vec<ExampleEvent> = organizer_ids
        .iter()
        .cycle()
        .take(seed_def.event_count())
        .map(|organizer_id| generate_event(&mut rng, *organizer_id))
        .collect();

    let registrations = generate_registrations(&mut rng, &users, &events);
    let follows = generate_follows(&mut rng, &users);
    let skills = generate_skills(&mut rng, &users);

    Ok(ExampleData {
        users,
        events,
        registrations,
        follows,
        skills,
    })
}

fn generate_user(
    rng: &mut ChaCha8Rng,
    role: RoleSeed,
    ordinal: usize,
) -> Result<ExampleUser, GenerationError> {
    let id = Uuid::from_u128(rng.random());
    let display_name = generate_display_name(rng)?;
    let email = derive_email(&display_name, ordinal);
    Ok(ExampleUser {
        id,
        display_name,
        email,
        role,
    })
}

fn generate_display_name(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let candidate = sanitise_display_name(&format!("{first} {last}"));
        if is_valid_display_name(&candidate) {
            return Ok(candidate);
        }
    }
    Err(GenerationError::DisplayNameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn generate_event(rng: &mut ChaCha8Rng, organizer_id: Uuid) -> ExampleEvent {
    let id = Uuid::from_u128(rng.random());
    let city: String = CityName(EN).fake_with_rng(rng);
    let activity = EVENT_ACTIVITIES.choose(rng).copied().unwrap_or("Community Day");
    let description = EVENT_PURPOSES
        .choose(rng)
        .copied()
        .unwrap_or_default()
        .to_owned();
    let location_address = rng.random_ratio(ADDRESS_ODDS, 10).then(|| {
        let number: String = BuildingNumber(EN).fake_with_rng(rng);
        let street: String = StreetName(EN).fake_with_rng(rng);
        format!("{number} {street}, {city}")
    });
    ExampleEvent {
        id,
        organizer_id,
        name: format!("{activity} in {city}"),
        description,
        location_address,
        days_from_base: rng.random_range(1..=EVENT_HORIZON_DAYS),
    }
}

fn generate_registrations(
    rng: &mut ChaCha8Rng,
    users: &[ExampleUser],
    events: &[ExampleEvent],
) -> Vec<ExampleRegistration> {
    let event_ids: Vec<Uuid> = events.iter().map(|event| event.id).collect();
    users
        .iter()
        .filter(|user| user.role == RoleSeed::Volunteer)
        .flat_map(|user| {
            select_subset(rng, &event_ids, MAX_REGISTRATIONS_PER_VOLUNTEER)
                .into_iter()
                .map(|event_id| ExampleRegistration {
                    user_id: user.id,
                    event_id,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn generate_follows(rng: &mut ChaCha8Rng, users: &[ExampleUser]) -> Vec<ExampleFollow> {
    let mut follows = Vec::new();
    for user in users {
        let others: Vec<Uuid> = users
            .iter()
            .map(|other| other.id)
            .filter(|id| *id != user.id)
            .collect();
        follows.extend(
            select_subset(rng, &others, MAX_FOLLOWS_PER_USER)
                .into_iter()
                .map(|followed_id| ExampleFollow {
                    follower_id: user.id,
                    followed_id,
                }),
        );
    }
    follows
}

fn generate_skills(rng: &mut ChaCha8Rng, users: &[ExampleUser]) -> Vec<ExampleSkills> {
    users
        .iter()
        .filter_map(|user| {
            let mut skills: Vec<String> = select_subset(rng, &SKILL_CATALOGUE, MAX_SKILLS_PER_USER)
                .into_iter()
                .map(str::to_owned)
                .collect();
            if skills.is_empty() {
                return None;
            }
            skills.sort();
            Some(ExampleSkills {
                user_id: user.id,
                skills,
            })
        })
        .collect()
}

/// Pick between zero and `max_count` distinct items.
fn select_subset<T: Clone>(rng: &mut ChaCha8Rng, items: &[T], max_count: usize) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    let count = rng.random_range(0..=max_count.min(items.len()));
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}
