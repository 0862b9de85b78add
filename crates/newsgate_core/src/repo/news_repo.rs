//! News item repository contract and SQLite implementation.
//!
//! # Invariants
//! - A duplicate `link` surfaces as `ConstraintKind::Unique`.
//! - An `agency_id` with no matching agency surfaces as
//!   `ConstraintKind::ForeignKey` (requires `foreign_keys=ON`).

use super::RepoResult;
use crate::model::news_item::{NewNewsItem, NewsItemId};
use rusqlite::{params, Connection};

/// Repository interface for news item inserts.
pub trait NewsItemRepository {
    fn insert_news_item(&self, item: &NewNewsItem<'_>) -> RepoResult<NewsItemId>;
}

/// SQLite-backed news item repository.
pub struct SqliteNewsItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNewsItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NewsItemRepository for SqliteNewsItemRepository<'_> {
    fn insert_news_item(&self, item: &NewNewsItem<'_>) -> RepoResult<NewsItemId> {
        self.conn.execute(
            "INSERT INTO news_items (
                published_at,
                title,
                article_text,
                link,
                agency_id
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                item.published_at.to_rfc3339(),
                item.title,
                item.article_text,
                item.link,
                item.agency_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}
