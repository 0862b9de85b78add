//! Agency (publisher) record.

use serde::{Deserialize, Serialize};

/// Surrogate key generated by the store.
pub type AgencyId = i64;

/// A news publisher as persisted in `agencies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agency {
    pub id: AgencyId,
    /// Unique across all agencies.
    pub name: String,
}
