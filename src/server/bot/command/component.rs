//! Button custom IDs of the form `backup:<action>:<snapshot id>`.

use serenity::all::{ButtonStyle, CreateActionRow, CreateButton};

const PREFIX: &str = "backup";

/// What a backup button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupAction {
    Download,
    Restore,
    Delete,
    Share,
    Info,
    /// Confirms a previewed restore. Only read by the confirmation collector.
    Confirm,
    /// Abandons a previewed restore. Only read by the confirmation collector.
    Cancel,
}

impl BackupAction {
    const ALL: [BackupAction; 7] = [
        BackupAction::Download,
        BackupAction::Restore,
        BackupAction::Delete,
        BackupAction::Share,
        BackupAction::Info,
        BackupAction::Confirm,
        BackupAction::Cancel,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Restore => "restore",
            Self::Delete => "delete",
            Self::Share => "share",
            Self::Info => "info",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
        }
    }

    /// Builds the custom ID for this action on a snapshot.
    pub fn custom_id(&self, backup_id: &str) -> String {
        format!("{}:{}:{}", PREFIX, self.as_str(), backup_id)
    }

    /// Parses a custom ID built by `custom_id`.
    ///
    /// # Returns
    /// - `Some((action, backup_id))` - A backup button
    /// - `None` - Another feature's component or a malformed ID
    pub fn parse(custom_id: &str) -> Option<(Self, String)> {
        let mut parts = custom_id.splitn(3, ':');

        if parts.next()? != PREFIX {
            return None;
        }

        let action = parts.next()?;
        let backup_id = parts.next().filter(|id| !id.is_empty())?;

        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == action)
            .map(|action| (action, backup_id.to_string()))
    }

    /// Actions handled by the collector of a pending confirmation, not the event handler.
    pub fn is_confirmation(&self) -> bool {
        matches!(self, Self::Confirm | Self::Cancel)
    }
}

/// Download, Restore, Delete, Share and Info buttons attached to a new backup.
pub fn snapshot_actions(backup_id: &str) -> Vec<CreateActionRow> {
    let button = |action: BackupAction, label: &str, style: ButtonStyle| {
        CreateButton::new(action.custom_id(backup_id))
            .label(label)
            .style(style)
    };

    vec![CreateActionRow::Buttons(vec![
        button(BackupAction::Download, "Download", ButtonStyle::Primary),
        button(BackupAction::Restore, "Restore", ButtonStyle::Success),
        button(BackupAction::Delete, "Delete", ButtonStyle::Danger),
        button(BackupAction::Share, "Share", ButtonStyle::Secondary),
        button(BackupAction::Info, "Info", ButtonStyle::Secondary),
    ])]
}

/// Confirm and Cancel buttons for a restore preview.
///
/// `disabled` is set once the confirmation window has closed.
pub fn confirm_actions(backup_id: &str, disabled: bool) -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(BackupAction::Confirm.custom_id(backup_id))
            .label("Confirm Restore")
            .style(ButtonStyle::Danger)
            .disabled(disabled),
        CreateButton::new(BackupAction::Cancel.custom_id(backup_id))
            .label("Cancel")
            .style(ButtonStyle::Secondary)
            .disabled(disabled),
    ])]
}
