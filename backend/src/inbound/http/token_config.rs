//! Bearer token configuration parsing and validation.
//!
//! Token signing settings come from the environment so they can be mounted as
//! secrets in production and mocked in tests through [`mockable::Env`].

use std::fmt;
use std::path::PathBuf;

use chrono::Duration;
use mockable::Env;
use rand::RngCore;
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

const SECRET_DEFAULT_PATH: &str = "/var/run/secrets/auth_token_secret";
const SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const DEFAULT_TTL_HOURS: i64 = 24;
const SECRET_FILE_ENV: &str = "AUTH_TOKEN_SECRET_FILE";
const TTL_HOURS_ENV: &str = "AUTH_TOKEN_TTL_HOURS";
const ALLOW_EPHEMERAL_ENV: &str = "AUTH_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const HOURS_EXPECTED: &str = "a whole number of hours between 1 and 8760";

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require a readable, sufficiently long secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use volunteer_hub::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Signing material and lifetime for issued bearer tokens.
pub struct TokenSettings {
    /// HMAC secret; wiped on drop.
    pub secret: Zeroizing<Vec<u8>>,
    /// How long an issued token stays valid.
    pub ttl: Duration,
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not sign with a throwaway secret.
    #[error("AUTH_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use volunteer_hub::inbound::http::token_config::{BuildMode, token_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = tempfile::NamedTempFile::new()?;
/// std::fs::write(secret.path(), vec![b'k'; 32])?;
///
/// let path = secret.path().to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "AUTH_TOKEN_SECRET_FILE" => Some(path.clone()),
///     "AUTH_TOKEN_TTL_HOURS" => Some("12".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.ttl.num_hours(), 12);
/// # Ok(())
/// # }
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let ttl = ttl_from_env(env, mode)?;
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let secret = secret_from_env(env, mode, allow_ephemeral)?;
    Ok(TokenSettings { secret, ttl })
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, TokenConfigError> {
    let Some(value) = env.string(TTL_HOURS_ENV) else {
        return Ok(Duration::hours(DEFAULT_TTL_HOURS));
    };
    match value.trim().parse::<i64>() {
        Ok(hours) if (1..=8760).contains(&hours) => Ok(Duration::hours(hours)),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid AUTH_TOKEN_TTL_HOURS; using 24 hours");
            Ok(Duration::hours(DEFAULT_TTL_HOURS))
        }
        _ => Err(TokenConfigError::InvalidEnv {
            name: TTL_HOURS_ENV,
            value,
            expected: HOURS_EXPECTED,
        }),
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(TokenConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid AUTH_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| SECRET_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SECRET_MIN_LEN {
                bytes.zeroize();
                return Err(TokenConfigError::SecretTooShort {
                    path,
                    length,
                    min_len: SECRET_MIN_LEN,
                });
            }
            Ok(Zeroizing::new(bytes))
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary token secret (dev only)"
            );
            let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
            rand::thread_rng().fill_bytes(secret.as_mut_slice());
            Ok(secret)
        }
        Err(error) => Err(TokenConfigError::SecretRead {
            path,
            source: error,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
