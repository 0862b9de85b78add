//! Domain records for the news store.
//!
//! # Responsibility
//! - Define agencies (publishers) and news items linked to one agency.
//! - Separate caller input (`NewsDraft`) from the row shape written to storage.
//!
//! # Invariants
//! - Store-generated ids are never assigned by callers.
//! - A `NewNewsItem` always carries a resolved agency id.

pub mod agency;
pub mod news_item;
