//! Caller-facing results of gateway operations.

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Gateway operation that produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    RegisterAgency,
    RecordNewsItem,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RegisterAgency => f.write_str("agency registration"),
            Self::RecordNewsItem => f.write_str("news recording"),
        }
    }
}

/// Result value of a gateway call.
///
/// Every expected failure mode is a variant here; gateway calls never return
/// `Err` or panic on storage problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GatewayOutcome {
    Created { name: String },
    AlreadyExists { name: String },
    Recorded { link: String },
    DuplicateLink { link: String },
    UnknownAgency { name: String },
    /// The store failed for a reason other than a known conflict. The
    /// transaction was rolled back.
    StorageFailure {
        operation: Operation,
        message: String,
    },
}

impl GatewayOutcome {
    /// True when the call persisted a new row.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Recorded { .. })
    }

    /// Stable snake_case label, used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::AlreadyExists { .. } => "already_exists",
            Self::Recorded { .. } => "recorded",
            Self::DuplicateLink { .. } => "duplicate_link",
            Self::UnknownAgency { .. } => "unknown_agency",
            Self::StorageFailure { .. } => "storage_failure",
        }
    }

    pub(crate) fn storage_failure(operation: Operation, err: &dyn std::error::Error) -> Self {
        Self::StorageFailure {
            operation,
            message: err.to_string(),
        }
    }
}

impl Display for GatewayOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created { name } => write!(f, "The new agency {name} is created."),
            Self::AlreadyExists { name } => {
                write!(f, "There is already an agency with such name: {name}")
            }
            Self::Recorded { .. } => f.write_str("The news has been successfully added"),
            Self::DuplicateLink { link } => {
                write!(f, "The link provided seems to exist in DB: {link}")
            }
            Self::UnknownAgency { name } => write!(
                f,
                "You are requesting access to the non-existing source: {name}"
            ),
            Self::StorageFailure { operation, message } => {
                write!(f, "Storage failure during {operation}: {message}")
            }
        }
    }
}
