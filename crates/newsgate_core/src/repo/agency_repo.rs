//! Agency repository contract and SQLite implementation.
//!
//! # Invariants
//! - Name lookups are exact (case-sensitive) matches.
//! - Duplicate names are rejected by the `idx_agencies_name` unique index and
//!   surface as `ConstraintKind::Unique`.

use super::RepoResult;
use crate::model::agency::{Agency, AgencyId};
use rusqlite::{Connection, OptionalExtension};

/// Repository interface for agency lookups and inserts.
pub trait AgencyRepository {
    fn agency_exists(&self, name: &str) -> RepoResult<bool>;
    /// Returns the first agency carrying `name`, if any.
    fn find_agency_by_name(&self, name: &str) -> RepoResult<Option<Agency>>;
    fn insert_agency(&self, name: &str) -> RepoResult<AgencyId>;
}

/// SQLite-backed agency repository.
///
/// Accepts a plain connection or a `Transaction` (via deref).
pub struct SqliteAgencyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAgencyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AgencyRepository for SqliteAgencyRepository<'_> {
    fn agency_exists(&self, name: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM agencies WHERE name = ?1);",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn find_agency_by_name(&self, name: &str) -> RepoResult<Option<Agency>> {
        let agency = self
            .conn
            .query_row(
                "SELECT id, name FROM agencies WHERE name = ?1 ORDER BY id ASC LIMIT 1;",
                [name],
                |row| {
                    Ok(Agency {
                        id: row.get("id")?,
                        name: row.get("name")?,
                    })
                },
            )
            .optional()?;
        Ok(agency)
    }

    fn insert_agency(&self, name: &str) -> RepoResult<AgencyId> {
        self.conn
            .execute("INSERT INTO agencies (name) VALUES (?1);", [name])?;
        Ok(self.conn.last_insert_rowid())
    }
}
