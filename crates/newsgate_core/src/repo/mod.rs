//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the lookups and inserts the record gateway composes.
//! - Isolate SQLite query details from gateway orchestration.
//! - Classify SQLite constraint failures so callers can map them to outcomes.
//!
//! # Invariants
//! - Repositories never open, commit or roll back transactions themselves;
//!   they run on whatever connection or transaction they are handed.

use crate::db::DbError;
use std::error::Error;
use std::ffi::c_int;
use std::fmt::{Display, Formatter};

pub mod agency_repo;
pub mod news_repo;

// SQLite extended result codes for SQLITE_CONSTRAINT (19).
const SQLITE_CONSTRAINT_FOREIGNKEY: c_int = 787;
const SQLITE_CONSTRAINT_NOTNULL: c_int = 1299;
const SQLITE_CONSTRAINT_PRIMARYKEY: c_int = 1555;
const SQLITE_CONSTRAINT_UNIQUE: c_int = 2067;

pub type RepoResult<T> = Result<T, RepoError>;

/// Which store-level constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Other,
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign_key",
            Self::NotNull => "not_null",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// Repository error for agency/news persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    ConstraintViolation {
        kind: ConstraintKind,
        source: rusqlite::Error,
    },
}

impl RepoError {
    /// Returns the violated constraint, if this error is a constraint failure.
    pub fn constraint(&self) -> Option<ConstraintKind> {
        match self {
            Self::ConstraintViolation { kind, .. } => Some(*kind),
            Self::Db(_) => None,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ConstraintViolation { kind, source } => {
                write!(f, "{kind} constraint violated: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::ConstraintViolation { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<r2d2::Error> for RepoError {
    fn from(value: r2d2::Error) -> Self {
        Self::Db(DbError::Pool(value))
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match constraint_kind(&value) {
            Some(kind) => Self::ConstraintViolation {
                kind,
                source: value,
            },
            None => Self::Db(DbError::Sqlite(value)),
        }
    }
}

fn constraint_kind(err: &rusqlite::Error) -> Option<ConstraintKind> {
    let rusqlite::Error::SqliteFailure(failure, _) = err else {
        return None;
    };
    if failure.code != rusqlite::ErrorCode::ConstraintViolation {
        return None;
    }

    let kind = match failure.extended_code {
        SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY => ConstraintKind::Unique,
        SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
        SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::NotNull,
        _ => ConstraintKind::Other,
    };
    Some(kind)
}
