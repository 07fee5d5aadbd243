//! Restore preview and report models.

use std::fmt;

use crate::server::model::guild::GuildSettingChange;

/// Maximum number of item errors shown to a user before collapsing into "+N more".
pub const SHOWN_ERROR_LIMIT: usize = 5;

/// Add/update counts for one payload section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionPlan {
    pub to_add: usize,
    pub to_update: usize,
}

/// Preview of what a restore would do to a live guild.
///
/// Restores never delete, so `to_remove` is always zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestorePlan {
    pub to_add: usize,
    pub to_update: usize,
    pub to_remove: usize,
    pub roles: SectionPlan,
    pub channels: SectionPlan,
    pub setting_changes: Vec<GuildSettingChange>,
}

/// Kind of item a restore step touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Setting,
    Role,
    Channel,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setting => f.write_str("Setting"),
            Self::Role => f.write_str("Role"),
            Self::Channel => f.write_str("Channel"),
        }
    }
}

/// Successful result of a single restore step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Created,
    Updated,
    SettingApplied,
    Skipped,
}

/// Failure of a single restore step; collected, never propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemApplyError {
    pub kind: ItemKind,
    pub name: String,
    pub reason: String,
}

impl ItemApplyError {
    pub fn new(kind: ItemKind, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ItemApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.name, self.reason)
    }
}

/// Aggregated result of a restore run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    pub restored_count: usize,
    pub updated_count: usize,
    pub created_count: usize,
    pub settings_applied: usize,
    pub skipped_count: usize,
    pub duration_ms: u64,
    pub errors: Vec<ItemApplyError>,
}

impl RestoreReport {
    /// Folds one step result into the counters.
    pub fn record(&mut self, step: Result<ItemOutcome, ItemApplyError>) {
        match step {
            Ok(ItemOutcome::Created) => {
                self.created_count += 1;
                self.restored_count += 1;
            }
            Ok(ItemOutcome::Updated) => {
                self.updated_count += 1;
                self.restored_count += 1;
            }
            Ok(ItemOutcome::SettingApplied) => self.settings_applied += 1,
            Ok(ItemOutcome::Skipped) => self.skipped_count += 1,
            Err(err) => {
                tracing::warn!("Restore step failed: {}", err);
                self.errors.push(err);
            }
        }
    }

    /// A run with item errors is a partial success.
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }

    /// First few errors as display lines, with a trailing "+N more" line when truncated.
    pub fn error_summary(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .errors
            .iter()
            .take(SHOWN_ERROR_LIMIT)
            .map(|err| err.to_string())
            .collect();

        if self.errors.len() > SHOWN_ERROR_LIMIT {
            lines.push(format!("+{} more", self.errors.len() - SHOWN_ERROR_LIMIT));
        }

        lines
    }
}
