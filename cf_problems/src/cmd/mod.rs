pub mod bot;
pub mod crawl;

use crate::modules::migration::MIGRATOR;
use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions, Postgres},
    Pool,
};
use std::env;

/// Create the connection pool and make sure the `problems` table exists.
///
/// `DATABASE_URL` wins when set; otherwise the standard `PGHOST`, `PGPORT`,
/// `PGUSER`, `PGPASSWORD` and `PGDATABASE` variables are used.
pub async fn connect() -> Result<Pool<Postgres>> {
    let options = match env::var("DATABASE_URL") {
        Ok(database_url) => database_url.parse::<PgConnectOptions>().with_context(|| {
            let message = "DATABASE_URL is not a valid PostgreSQL connection string.";
            tracing::error!(message);
            message
        })?,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL is not set, \
                 so connection parameters are read from PG* environment variables."
            );
            PgConnectOptions::new()
        }
    };

    let pool: Pool<Postgres> = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| {
            let message = "Failed to create database connection pool.";
            tracing::error!(message);
            message
        })?;

    MIGRATOR.run(&pool).await.with_context(|| {
        let message = "Failed to create problems table.";
        tracing::error!(message);
        message
    })?;

    Ok(pool)
}
