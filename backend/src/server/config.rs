//! Server settings loaded via OrthoConfig and the assembled server config.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use volunteer_hub::domain::ports::{BlobStore, PasswordHasher};
use volunteer_hub::inbound::http::token_config::TokenSettings;
use volunteer_hub::outbound::persistence::PoolConfig;

use super::state_builders::Stores;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_UPLOAD_BASE_URL: &str = "/uploads";

/// Process settings read from `VOLUNTEER_HUB_*` environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VOLUNTEER_HUB")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the in-memory stores are used.
    pub database_url: Option<String>,
    /// Directory uploaded images are written to.
    pub upload_dir: Option<PathBuf>,
    /// URL prefix under which uploaded images are published.
    pub upload_base_url: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_size: u32,
}

impl ServerSettings {
    /// Parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when the configured value is not a
    /// socket address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid VOLUNTEER_HUB_BIND_ADDR {raw:?}: {err}"),
            )
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR))
    }

    pub fn upload_base_url(&self) -> &str {
        self.upload_base_url
            .as_deref()
            .unwrap_or(DEFAULT_UPLOAD_BASE_URL)
    }

    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        PoolConfig::new(database_url).with_max_size(self.pool_size)
    }
}

/// Everything [`super::create_server`] needs.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) stores: Stores,
    pub(crate) blobs: Arc<dyn BlobStore>,
    pub(crate) hasher: Arc<dyn PasswordHasher>,
    pub(crate) tokens: TokenSettings,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        stores: Stores,
        blobs: Arc<dyn BlobStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenSettings,
    ) -> Self {
        Self {
            bind_addr,
            stores,
            blobs,
            hasher,
            tokens,
        }
    }
}
