//! Transactional agency/news writes over a shared connection pool.
//!
//! # Responsibility
//! - Run each write as one IMMEDIATE transaction on one pooled connection.
//! - Map conflicts and store failures to `GatewayOutcome` values.
//!
//! # Invariants
//! - Every non-success path rolls back; nothing is partially persisted.
//! - The pooled connection is returned on every exit path (guard drop).
//! - Storage failures are reported as `StorageFailure`, never as success.
//! - Logs carry outcome kinds and timings only, never titles or article text.

use super::outcome::{GatewayOutcome, Operation};
use crate::db::DbPool;
use crate::model::news_item::{NewNewsItem, NewsDraft};
use crate::repo::agency_repo::{AgencyRepository, SqliteAgencyRepository};
use crate::repo::news_repo::{NewsItemRepository, SqliteNewsItemRepository};
use crate::repo::{ConstraintKind, RepoResult};
use log::{error, info, warn};
use rusqlite::TransactionBehavior;
use std::time::Instant;

/// Persistence gateway for agencies and news items.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct RecordGateway {
    pool: DbPool,
}

impl RecordGateway {
    /// Creates a gateway over a migrated pool (see `db::open_pool`).
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Registers an agency unless one with the same name exists.
    ///
    /// # Contract
    /// - `Created` when a new row was committed.
    /// - `AlreadyExists` when the name is taken, whether found by the
    ///   pre-insert check or by the unique index on a lost race.
    /// - `StorageFailure` for anything else; the transaction is rolled back.
    pub fn register_agency(&self, name: &str) -> GatewayOutcome {
        let started_at = Instant::now();
        let outcome = self
            .try_register_agency(name)
            .unwrap_or_else(|err| GatewayOutcome::storage_failure(Operation::RegisterAgency, &err));
        log_outcome("agency_register", &outcome, started_at);
        outcome
    }

    /// Records a news item against the agency named in `draft`.
    ///
    /// # Contract
    /// - `Recorded` when the row was committed.
    /// - `UnknownAgency` when no agency carries `draft.agency_name`; no row is
    ///   written.
    /// - `DuplicateLink` when another news item already uses `draft.link`.
    /// - `StorageFailure` for anything else; the transaction is rolled back.
    pub fn record_news_item(&self, draft: &NewsDraft) -> GatewayOutcome {
        let started_at = Instant::now();
        let outcome = self
            .try_record_news_item(draft)
            .unwrap_or_else(|err| GatewayOutcome::storage_failure(Operation::RecordNewsItem, &err));
        log_outcome("news_record", &outcome, started_at);
        outcome
    }

    fn try_register_agency(&self, name: &str) -> RepoResult<GatewayOutcome> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let repo = SqliteAgencyRepository::new(&tx);

        if repo.agency_exists(name)? {
            tx.rollback()?;
            return Ok(GatewayOutcome::AlreadyExists {
                name: name.to_string(),
            });
        }

        match repo.insert_agency(name) {
            Ok(_) => {
                tx.commit()?;
                Ok(GatewayOutcome::Created {
                    name: name.to_string(),
                })
            }
            Err(err) if err.constraint() == Some(ConstraintKind::Unique) => {
                tx.rollback()?;
                Ok(GatewayOutcome::AlreadyExists {
                    name: name.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    fn try_record_news_item(&self, draft: &NewsDraft) -> RepoResult<GatewayOutcome> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let agency = SqliteAgencyRepository::new(&tx).find_agency_by_name(&draft.agency_name)?;
        let Some(agency) = agency else {
            tx.rollback()?;
            return Ok(unknown_agency(draft));
        };

        let item = NewNewsItem::from_draft(draft, agency.id);
        let inserted = SqliteNewsItemRepository::new(&tx).insert_news_item(&item);
        match inserted {
            Ok(_) => {
                tx.commit()?;
                Ok(GatewayOutcome::Recorded {
                    link: draft.link.clone(),
                })
            }
            Err(err) => match err.constraint() {
                Some(ConstraintKind::Unique) => {
                    tx.rollback()?;
                    Ok(GatewayOutcome::DuplicateLink {
                        link: draft.link.clone(),
                    })
                }
                Some(ConstraintKind::ForeignKey) => {
                    tx.rollback()?;
                    Ok(unknown_agency(draft))
                }
                _ => Err(err),
            },
        }
    }
}

fn unknown_agency(draft: &NewsDraft) -> GatewayOutcome {
    GatewayOutcome::UnknownAgency {
        name: draft.agency_name.clone(),
    }
}

fn log_outcome(event: &str, outcome: &GatewayOutcome, started_at: Instant) {
    let duration_ms = started_at.elapsed().as_millis();
    match outcome {
        GatewayOutcome::StorageFailure { message, .. } => error!(
            "event={event} module=gateway status=error duration_ms={duration_ms} outcome={} error={message}",
            outcome.kind()
        ),
        _ if outcome.is_success() => info!(
            "event={event} module=gateway status=ok duration_ms={duration_ms} outcome={}",
            outcome.kind()
        ),
        _ => warn!(
            "event={event} module=gateway status=rejected duration_ms={duration_ms} outcome={}",
            outcome.kind()
        ),
    }
}
