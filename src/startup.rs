use tracing_subscriber::EnvFilter;

use crate::{config::Config, data::snapshot::SnapshotStore, error::AppError};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,guildvault=debug";

/// Installs the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, falling back to `info` for dependencies and `debug`
/// for this crate.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the guild registry table exists
/// before the bot receives its first guild event.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Opens the snapshot store, creating its directory if needed.
pub async fn open_snapshot_store(config: &Config) -> Result<SnapshotStore, AppError> {
    let store = SnapshotStore::new(&config.snapshot_dir);
    store.init().await?;

    tracing::info!("Snapshot artifacts are stored in {}", config.snapshot_dir);

    Ok(store)
}

/// Creates the HTTP client used to download attachments and role icons.
///
/// Redirects are disabled so a CDN URL cannot bounce the download to an arbitrary host.
///
/// # Returns
/// - `reqwest::Client` - Configured HTTP client
pub fn setup_reqwest_client() -> reqwest::Client {
    reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap_or_default()
}
