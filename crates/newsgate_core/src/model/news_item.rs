//! News item records.
//!
//! # Invariants
//! - `link` is unique across all persisted news items.
//! - `published_at` is persisted as RFC 3339 text in UTC.

use super::agency::AgencyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate key generated by the store.
pub type NewsItemId = i64;

/// Caller input for recording one news item against an agency name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDraft {
    pub published_at: DateTime<Utc>,
    pub title: String,
    pub article_text: String,
    pub link: String,
    /// Resolved to an agency id inside the recording transaction.
    pub agency_name: String,
}

impl NewsDraft {
    pub fn new(
        published_at: DateTime<Utc>,
        title: impl Into<String>,
        article_text: impl Into<String>,
        link: impl Into<String>,
        agency_name: impl Into<String>,
    ) -> Self {
        Self {
            published_at,
            title: title.into(),
            article_text: article_text.into(),
            link: link.into(),
            agency_name: agency_name.into(),
        }
    }
}

/// Row shape inserted into `news_items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNewsItem<'a> {
    pub published_at: DateTime<Utc>,
    pub title: &'a str,
    pub article_text: &'a str,
    pub link: &'a str,
    pub agency_id: AgencyId,
}

impl<'a> NewNewsItem<'a> {
    /// Binds a draft to the agency row it was resolved to.
    pub fn from_draft(draft: &'a NewsDraft, agency_id: AgencyId) -> Self {
        Self {
            published_at: draft.published_at,
            title: draft.title.as_str(),
            article_text: draft.article_text.as_str(),
            link: draft.link.as_str(),
            agency_id,
        }
    }
}
