//! Error types for registry parsing and data generation.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Version found in the registry.
        actual: u32,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// Two seeds share a name.
    #[error("seed '{name}' is defined more than once")]
    DuplicateSeed {
        /// The repeated seed name.
        name: String,
    },

    /// A seed asks for events but no organizers to publish them.
    #[error("seed '{name}' requests events but no organizers")]
    EventsWithoutOrganizers {
        /// The offending seed name.
        name: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Failures while expanding a seed into records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a valid display name after maximum retries.
    #[error("failed to generate valid display name after {max_attempts} attempts")]
    DisplayNameGenerationFailed {
        /// Number of attempts made.
        max_attempts: usize,
    },
}
