//! bb8 connection pool over `diesel-async` PostgreSQL connections.
//!
//! Repositories hold a cloned [`DbPool`] and check out one connection per
//! port call. Checkout failures surface as [`PoolError::Checkout`] and are
//! reported to clients as a temporarily unavailable store.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Failure to build the pool or to check a connection out of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("failed to check out a database connection: {message}")]
    Checkout { message: String },
    #[error("failed to build the database pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool sizing and timeouts.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use volunteer_hub::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/volunteer_hub")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    pub const DEFAULT_MAX_SIZE: u32 = 10;

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: Self::DEFAULT_MAX_SIZE,
            min_idle: Some(1),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the upper bound on open connections. Zero is raised to one.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self.min_idle = self.min_idle.map(|idle| idle.min(self.max_size));
        self
    }

    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle.map(|idle| idle.min(self.max_size));
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    pub fn min_idle(&self) -> Option<u32> {
        self.min_idle
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }
}

/// Shared handle to the connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the manager cannot be initialised.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_size())
            .min_idle(config.min_idle())
            .connection_timeout(config.connection_timeout())
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection frees up within the
    /// configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_keep_one_idle_connection() {
        let config = PoolConfig::new("postgres://localhost/test");
        assert_eq!(config.database_url(), "postgres://localhost/test");
        assert_eq!(config.max_size(), PoolConfig::DEFAULT_MAX_SIZE);
        assert_eq!(config.min_idle(), Some(1));
        assert_eq!(config.connection_timeout(), Duration::from_secs(30));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(25, 25)]
    fn max_size_is_at_least_one(#[case] requested: u32, #[case] expected: u32) {
        let config = PoolConfig::new("postgres://localhost/test").with_max_size(requested);
        assert_eq!(config.max_size(), expected);
    }

    #[rstest]
    fn min_idle_never_exceeds_max_size() {
        let config = PoolConfig::new("postgres://localhost/test")
            .with_max_size(2)
            .with_min_idle(Some(5));
        assert_eq!(config.min_idle(), Some(2));
    }

    #[rstest]
    fn errors_carry_their_message() {
        assert!(
            PoolError::checkout("connection refused")
                .to_string()
                .contains("connection refused")
        );
        assert!(PoolError::build("invalid URL").to_string().contains("invalid URL"));
    }
}
