//! Persistence gateway for a news-aggregation store.
//!
//! Registers agencies (publishers) and records news items linked to them,
//! each write in its own transaction on a shared SQLite connection pool.

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{ConfigError, GatewayConfig};
pub use db::{open_pool, open_pool_in_memory, DbError, DbPool};
pub use gateway::{GatewayOutcome, Operation, RecordGateway};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::agency::{Agency, AgencyId};
pub use model::news_item::{NewsDraft, NewsItemId};
pub use repo::{ConstraintKind, RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
