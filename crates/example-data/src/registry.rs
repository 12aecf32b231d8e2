//! Seed registry parsing.
//!
//! The registry is a versioned JSON document naming each reproducible
//! dataset and how many volunteers, organizers and events it contains.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;

const SUPPORTED_VERSION: u32 = 1;

/// Named seeds available for demo data generation.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{"name": "test", "seed": 42, "volunteerCount": 5, "organizerCount": 1, "eventCount": 2}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parse a registry from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the JSON is malformed, the version is
    /// unsupported, no seeds are defined, a seed name repeats, or a seed asks
    /// for events without organizers.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;
        Self::from_raw(raw)
    }

    /// Load a registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }
        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let mut names = HashSet::new();
        let mut seeds = Vec::with_capacity(raw.seeds.len());
        for seed in raw.seeds {
            if !names.insert(seed.name.clone()) {
                return Err(RegistryError::DuplicateSeed { name: seed.name });
            }
            if seed.event_count > 0 && seed.organizer_count == 0 {
                return Err(RegistryError::EventsWithoutOrganizers { name: seed.name });
            }
            seeds.push(SeedDefinition {
                name: seed.name,
                seed: seed.seed,
                volunteer_count: seed.volunteer_count,
                organizer_count: seed.organizer_count,
                event_count: seed.event_count,
            });
        }

        Ok(Self {
            version: raw.version,
            seeds,
        })
    }

    /// Registry format version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// All seed definitions in file order.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Find a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed has that name.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// One reproducible dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    volunteer_count: usize,
    organizer_count: usize,
    event_count: usize,
}

impl SeedDefinition {
    /// Seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of volunteer accounts to generate.
    #[must_use]
    pub const fn volunteer_count(&self) -> usize {
        self.volunteer_count
    }

    /// Number of organizer accounts to generate.
    #[must_use]
    pub const fn organizer_count(&self) -> usize {
        self.organizer_count
    }

    /// Number of events to generate.
    #[must_use]
    pub const fn event_count(&self) -> usize {
        self.event_count
    }

    /// Copy of this definition with a different volunteer count.
    #[must_use]
    pub fn with_volunteer_count(&self, volunteer_count: usize) -> Self {
        Self {
            volunteer_count,
            ..self.clone()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    volunteer_count: usize,
    #[serde(default)]
    organizer_count: usize,
    #[serde(default)]
    event_count: usize,
}
