//! Postgres pool construction and embedded schema migrations.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

use crate::config::DatabaseConfig;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a connection pool for the configured database.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let ssl_mode: PgSslMode = config.ssl_mode.parse()?;
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port as u16)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
        .ssl_mode(ssl_mode)
        .options([("search_path", config.schema.as_str())]);

    PgPoolOptions::new()
        .max_connections(config.max_open_conns)
        .min_connections(config.max_idle_conns)
        .max_lifetime(config.conn_max_lifetime)
        .connect_with(options)
        .await
}

/// Apply pending migrations from the embedded `migrations/` directory,
/// returning how many were applied.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, sqlx::Error> {
    // The bookkeeping table does not exist on a fresh database.
    let before = applied_count(pool).await.unwrap_or(0);
    MIGRATOR.run(pool).await?;
    let after = applied_count(pool).await?;
    Ok(after.saturating_sub(before) as usize)
}

async fn applied_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT count(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
}
