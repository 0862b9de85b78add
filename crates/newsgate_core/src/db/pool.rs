//! Connection pool bootstrap for SQLite.
//!
//! # Responsibility
//! - Build file-backed or in-memory `r2d2` pools.
//! - Configure per-connection pragmas required by the gateway.
//! - Apply schema migrations once, before the pool is handed out.
//!
//! # Invariants
//! - Pooled connections have `foreign_keys=ON` and a busy timeout.
//! - Returned pools have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbPool, DbResult};
use crate::config::GatewayConfig;
use log::{error, info};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::time::{Duration, Instant};

const IN_MEMORY_BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const IN_MEMORY_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens a pool over the database file named by `config`.
///
/// The file is created when missing. Pool size and acquisition timeout come
/// from `config`.
///
/// # Side effects
/// - Opens `config.max_connections` connections eagerly.
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool(config: &GatewayConfig) -> DbResult<DbPool> {
    let manager = SqliteConnectionManager::file(&config.database_path)
        .with_init(configure_connection(config.busy_timeout()));
    let builder = Pool::builder()
        .max_size(config.max_connections.max(1))
        .connection_timeout(config.connection_timeout());

    build_pool("file", || builder.build(manager))
}

/// Opens a single-connection pool over a private in-memory database.
///
/// Each in-memory SQLite connection is its own database, so the pool holds
/// exactly one connection and never recycles it.
pub fn open_pool_in_memory() -> DbResult<DbPool> {
    let manager =
        SqliteConnectionManager::memory().with_init(configure_connection(IN_MEMORY_BUSY_TIMEOUT));
    let builder = Pool::builder()
        .max_size(1)
        .max_lifetime(None)
        .idle_timeout(None)
        .connection_timeout(IN_MEMORY_CONNECTION_TIMEOUT);

    build_pool("memory", || builder.build(manager))
}

fn build_pool(
    mode: &str,
    build: impl FnOnce() -> Result<DbPool, r2d2::Error>,
) -> DbResult<DbPool> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let pool = match build() {
        Ok(pool) => pool,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_pool_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_pool(&pool) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={} max_connections={}",
                mode,
                started_at.elapsed().as_millis(),
                pool.max_size()
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_pool(pool: &DbPool) -> DbResult<()> {
    let mut conn = pool.get()?;
    apply_migrations(&mut conn)
}

fn configure_connection(
    busy_timeout: Duration,
) -> impl Fn(&mut Connection) -> rusqlite::Result<()> + Send + Sync + 'static {
    move |conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(busy_timeout)
    }
}
