use sqlx::migrate::Migrator;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::{
    fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt,
};

pub mod config;
pub mod error;
pub mod static_file;
pub mod template;

pub use error::FetchError;

pub type DB = sqlx::MySql;

static MIGRATOR: Migrator = sqlx::migrate!(); // defaults to "./migrations"

/// Lazy pool: no connection is opened until a request needs one, so the web
/// server starts even when the database is down. Acquire failures stay
/// scoped to the request that hit them.
pub fn connect_to_db(config: &config::AppConfig) -> MySqlPool {
    let options = MySqlConnectOptions::new()
        .host(&config.db_host)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name);

    MySqlPoolOptions::new()
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options)
}

pub async fn ensure_schema(pool: &MySqlPool) -> anyhow::Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

pub fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::Layer::new()
                .with_writer(std::io::stdout.with_max_level(Level::INFO))
                .compact(),
        )
        .init();
}
