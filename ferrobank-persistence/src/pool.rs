use std::time::Duration;

use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};

use crate::DatabaseConfig;

pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Builds the process-wide pool. Lazy: the first query opens the first
/// connection.
pub fn connect(db_source: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .connect_lazy(db_source)
}
