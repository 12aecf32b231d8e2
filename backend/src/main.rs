//! Backend entry-point: loads settings, picks the stores and serves the API.

mod server;

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use volunteer_hub::domain::ports::{BlobStore, PasswordHasher};
use volunteer_hub::inbound::http::health::HealthState;
use volunteer_hub::inbound::http::token_config::{BuildMode, token_settings_from_env};
use volunteer_hub::outbound::auth::Argon2PasswordHasher;
use volunteer_hub::outbound::blob::DirBlobStore;
use volunteer_hub::outbound::persistence::{DbPool, run_pending_migrations};

use server::{ServerConfig, ServerSettings, Stores, create_server};

const PROGRAM_NAME: &str = "volunteer-hub";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
        .map_err(|err| io::Error::other(format!("failed to load server settings: {err}")))?;
    let tokens = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;

    let stores = open_stores(&settings).await?;
    let upload_dir = settings.upload_dir();
    let blobs: Arc<dyn BlobStore> = Arc::new(
        DirBlobStore::open(&upload_dir, settings.upload_base_url()).map_err(|err| {
            io::Error::other(format!(
                "failed to open upload directory {}: {err}",
                upload_dir.display()
            ))
        })?,
    );
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());

    #[cfg(feature = "example-data")]
    seed_example_data(&stores, &hasher).await?;

    let bind_addr = settings.bind_addr()?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(bind_addr, stores, blobs, hasher, tokens),
    )?;
    info!(%bind_addr, "listening");
    server.await
}

async fn open_stores(settings: &ServerSettings) -> io::Result<Stores> {
    let Some(database_url) = settings.database_url() else {
        warn!("VOLUNTEER_HUB_DATABASE_URL not set; using in-memory stores");
        return Ok(Stores::in_memory());
    };

    let applied = run_pending_migrations(database_url)
        .await
        .map_err(io::Error::other)?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(settings.pool_config(database_url))
        .await
        .map_err(io::Error::other)?;
    Ok(Stores::postgres(&pool))
}

#[cfg(feature = "example-data")]
async fn seed_example_data(stores: &Stores, hasher: &Arc<dyn PasswordHasher>) -> io::Result<()> {
    use volunteer_hub::example_data::{
        ExampleDataSettings, SeedTargets, seed_example_data_on_startup,
    };

    let settings = ExampleDataSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
        .map_err(|err| io::Error::other(format!("failed to load example data settings: {err}")))?;
    let targets = SeedTargets {
        seeds: stores.seeds.clone(),
        hasher: hasher.clone(),
    };
    seed_example_data_on_startup(&settings, &targets, &mockable::DefaultClock)
        .await
        .map_err(io::Error::other)?;
    Ok(())
}
