//! SQLite connection pool and migration utilities.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::errors::PipelineError;

/// Open (creating if absent) the patch store and bring its schema up to date.
///
/// Safe to call on every run. The pool holds a single connection since the
/// pipeline is the only writer.
pub async fn open_store(path: impl AsRef<Path>) -> Result<SqlitePool, PipelineError> {
    let options = SqliteConnectOptions::new()
        .filename(path.as_ref())
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
