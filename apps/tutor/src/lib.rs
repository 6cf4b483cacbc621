//! Linux Quest tutor: answer checking, mistake tracking and progress
//! persistence for the interactive command-line lessons.
//!
//! The presentation layer calls into [`commands`] with a single [`AppState`]
//! built by [`bootstrap`] (or [`AppState::in_memory`] in tests). No command
//! returns an error: storage failures are logged and absorbed.

pub mod commands;
pub mod config;
pub mod db;
pub mod events;
pub mod state;

pub use config::TutorConfig;
pub use db::{StorageGateway, StorageInfo};
pub use events::{DataChangeNotifier, SubscriptionToken};
pub use state::AppState;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global log subscriber. Later calls are no-ops.
pub fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Load configuration, start logging and open the progress store.
///
/// Only configuration errors are returned; an unusable store degrades to
/// running without persistence.
pub fn bootstrap() -> anyhow::Result<AppState> {
    let config = TutorConfig::from_env()?;
    init_tracing(&config.log_filter);

    tracing::info!(path = %config.db_path.display(), "opening progress store");
    Ok(AppState::open(&config))
}
