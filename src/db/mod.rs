//! Connection pool, migrations and the per-table query functions.
//!
//! Query functions take `&mut PgConnection` so they run inside whatever
//! transaction the calling handler opened with [`begin`]. A handler's
//! transaction is its unit of work: it is committed explicitly on success and
//! rolled back when dropped on any other path.

pub mod todos;
pub mod users;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};

use crate::config::Config;
use crate::error::AppError;

pub type Tx = Transaction<'static, Postgres>;

pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
}

pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Opens the unit of work for one request.
pub async fn begin(pool: &PgPool) -> Result<Tx, AppError> {
    Ok(pool.begin().await?)
}
