use crate::config::Config;
use crate::error::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections.max(1))
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
}

pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let pool = pool_options(config).connect(&config.database_url).await?;
    tracing::info!(
        max_connections = config.db_max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// A pool that only dials the database on first use.
pub fn create_lazy_pool(config: &Config) -> Result<PgPool> {
    Ok(pool_options(config).connect_lazy(&config.database_url)?)
}

pub async fn close_pool(pool: &PgPool) {
    pool.close().await;
    tracing::info!("database pool closed");
}
