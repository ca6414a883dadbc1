mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;

use crate::{
    config::Config,
    error::AppError,
    scheduler::snapshot::{SnapshotJobContext, SnapshotScheduler},
    service::gate::ConfirmationGate,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    startup::init_tracing();

    let db = startup::connect_to_database(&config).await?;
    let store = startup::open_snapshot_store(&config).await?;
    let downloader = startup::setup_reqwest_client();

    // Jobs are registered per guild as guild_create events arrive
    let scheduler = SnapshotScheduler::start(
        config.snapshot_cron.clone(),
        SnapshotJobContext {
            db: db.clone(),
            store: store.clone(),
            downloader: downloader.clone(),
            pacing: config.restore_call_delay,
            retention_days: config.snapshot_retention_days,
        },
    )
    .await?;

    let gate = ConfirmationGate::new(config.confirmation_window);

    let state = AppState::new(
        db,
        store,
        downloader,
        gate,
        scheduler,
        config.restore_call_delay,
        config.snapshot_retention_days,
    );

    bot::start::start_bot(&config, state).await
}
