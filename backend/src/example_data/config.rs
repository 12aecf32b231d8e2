//! Demo data settings loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SEED_NAME: &str = "riverside";
const DEFAULT_PASSWORD: &str = "password123";

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("seeds.json")
}

/// Controls demo data seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Seed demo data on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Seed name to load from the registry.
    pub seed_name: Option<String>,
    /// Override for the number of volunteers generated.
    #[ortho_config(file_key = "volunteer_count")]
    pub count: Option<usize>,
    /// Registry path override.
    pub registry_path: Option<PathBuf>,
    /// Password shared by every seeded account.
    pub password: Option<String>,
}

impl ExampleDataSettings {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or(DEFAULT_PASSWORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ExampleDataSettings {
        ExampleDataSettings::load_from_iter([OsString::from("volunteer-hub")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", None::<String>),
            ("EXAMPLE_DATA_SEED_NAME", None::<String>),
            ("EXAMPLE_DATA_COUNT", None::<String>),
            ("EXAMPLE_DATA_REGISTRY_PATH", None::<String>),
            ("EXAMPLE_DATA_PASSWORD", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.is_enabled());
        assert_eq!(settings.seed_name(), DEFAULT_SEED_NAME);
        assert_eq!(settings.registry_path(), default_registry_path());
        assert_eq!(settings.password(), DEFAULT_PASSWORD);
        assert!(settings.count.is_none());
    }

    #[rstest]
    fn environment_overrides_apply() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", Some("true".to_owned())),
            ("EXAMPLE_DATA_SEED_NAME", Some("harbour-lights".to_owned())),
            ("EXAMPLE_DATA_COUNT", Some("5".to_owned())),
            ("EXAMPLE_DATA_REGISTRY_PATH", Some("/tmp/seeds.json".to_owned())),
            ("EXAMPLE_DATA_PASSWORD", Some("hunter2hunter2".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.is_enabled());
        assert_eq!(settings.seed_name(), "harbour-lights");
        assert_eq!(settings.registry_path(), PathBuf::from("/tmp/seeds.json"));
        assert_eq!(settings.count, Some(5));
        assert_eq!(settings.password(), "hunter2hunter2");
    }
}
