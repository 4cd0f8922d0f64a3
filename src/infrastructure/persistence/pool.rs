//! SQLite connection pool setup.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;

/// Opens the connection pool described by `config`.
///
/// The database file is created if it does not exist. WAL journaling lets
/// lookups proceed while a write is in flight; `busy_timeout` bounds how long
/// a writer waits for the lock before the call fails instead of hanging.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed or the first connection
/// cannot be established.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(config.db_busy_timeout));

    SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
        .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)))
        .connect_with(options)
        .await
}

/// Applies the embedded schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails or the migration table is inconsistent.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
