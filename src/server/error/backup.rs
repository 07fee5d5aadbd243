//! Backup engine error taxonomy.
//!
//! Precondition failures raised by the snapshot store and the restore engine. Every
//! variant stops the current operation before any guild mutation happens. Failures of
//! individual items during a restore are not errors at this level; they are collected
//! as `ItemApplyError`s inside the restore report instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackupError {
    /// The owner already holds the maximum number of snapshots for this guild.
    ///
    /// Non-retryable until one of the owner's snapshots is deleted.
    #[error("Backup limit reached: you already have {limit} backups in this server")]
    QuotaExceeded {
        /// Maximum number of snapshots per owner per guild
        limit: u64,
    },

    /// The snapshot doesn't exist, or isn't owned by the caller in this guild.
    ///
    /// Ownership and guild scoping are part of the lookup, so a snapshot owned by
    /// someone else is indistinguishable from a missing one.
    #[error("Backup `{id}` not found")]
    NotFound {
        /// Snapshot ID that was requested
        id: String,
    },

    /// The bot lacks capabilities required to restore into the guild.
    ///
    /// Raised before any work is done.
    #[error("Missing permissions: {}", .missing.join(", "))]
    InsufficientPermissions {
        /// Human readable names of the missing capabilities
        missing: Vec<String>,
    },

    /// The stored payload is malformed or doesn't match its recorded kind.
    #[error("Invalid backup data: {0}")]
    InvalidSnapshot(String),
}

/// User-facing rendering of an error: what happened and what to do about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPresentation {
    pub title: String,
    pub detail: String,
    pub suggestion: String,
}

impl BackupError {
    /// Builds the title, detail and remediation shown to the user for this error.
    pub fn presentation(&self) -> ErrorPresentation {
        let (title, suggestion) = match self {
            Self::QuotaExceeded { .. } => (
                "Backup Limit Reached",
                "Delete an old backup with `/backup delete` before creating a new one.",
            ),
            Self::NotFound { .. } => (
                "Backup Not Found",
                "Use `/backup list` to see the backups you own in this server.",
            ),
            Self::InsufficientPermissions { .. } => (
                "Insufficient Permissions",
                "Grant the bot the missing permissions and move its role above the roles it should manage.",
            ),
            Self::InvalidSnapshot(_) => (
                "Invalid Backup",
                "This backup can't be restored. Create a fresh backup and try again.",
            ),
        };

        ErrorPresentation {
            title: title.to_string(),
            detail: self.to_string(),
            suggestion: suggestion.to_string(),
        }
    }
}

/// Converts backup errors into HTTP responses.
///
/// # Returns
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `QuotaExceeded`
/// - 403 Forbidden - For `InsufficientPermissions`
/// - 422 Unprocessable Entity - For `InvalidSnapshot`
impl IntoResponse for BackupError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::QuotaExceeded { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InsufficientPermissions { .. } => StatusCode::FORBIDDEN,
            Self::InvalidSnapshot(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
