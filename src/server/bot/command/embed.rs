//! Embeds shown in replies to the `/backup` command and its buttons.

use serenity::all::{CreateEmbed, CreateEmbedFooter};

use crate::server::{
    error::AppError,
    model::{
        restore::{RestorePlan, RestoreReport},
        schedule::BackupSchedule,
        snapshot::{Snapshot, SnapshotList, MAX_SNAPSHOTS_PER_OWNER},
    },
};

const COLOR_SUCCESS: u32 = 0x57F287;
const COLOR_INFO: u32 = 0x5865F2;
const COLOR_WARNING: u32 = 0xFEE75C;
const COLOR_ERROR: u32 = 0xED4245;

/// Formats a byte count with binary units, e.g. `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Renders an error with what went wrong and how to fix it.
///
/// Backup precondition failures are shown verbatim. Anything else is logged and
/// replaced with a generic message.
pub fn error(err: &AppError) -> CreateEmbed {
    let (title, detail, suggestion) = match err {
        AppError::BackupErr(backup_err) => {
            let presentation = backup_err.presentation();
            (
                presentation.title,
                presentation.detail,
                presentation.suggestion,
            )
        }
        AppError::BadRequest(message) => (
            "Invalid Command".to_string(),
            message.clone(),
            "Check the command options and try again.".to_string(),
        ),
        _ => {
            tracing::error!("Backup command failed: {}", err);
            (
                "Something Went Wrong".to_string(),
                "The request couldn't be completed.".to_string(),
                "Try again in a moment. If it keeps failing, check the bot's permissions."
                    .to_string(),
            )
        }
    };

    CreateEmbed::new()
        .title(format!("❌ {}", title))
        .description(detail)
        .field("Suggestion", suggestion, false)
        .color(COLOR_ERROR)
}

fn snapshot_fields(embed: CreateEmbed, snapshot: &Snapshot) -> CreateEmbed {
    embed
        .field("Backup ID", format!("`{}`", snapshot.id), true)
        .field("Type", snapshot.kind.label(), true)
        .field("Size", format_size(snapshot.size_bytes), true)
        .field("Roles", snapshot.payload.roles().len().to_string(), true)
        .field("Channels", snapshot.payload.channels().len().to_string(), true)
        .field("Emojis", snapshot.payload.emojis().len().to_string(), true)
        .field(
            "Created",
            format!("<t:{}:R>", snapshot.created_at.timestamp()),
            true,
        )
}

/// Confirms a newly created backup.
pub fn created(snapshot: &Snapshot) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .title("✅ Backup Created")
        .description(
            snapshot
                .description
                .clone()
                .unwrap_or_else(|| format!("Backup of **{}**", snapshot.guild_name)),
        )
        .color(COLOR_SUCCESS);

    snapshot_fields(embed, snapshot)
        .footer(CreateEmbedFooter::new("Use the buttons below to manage this backup"))
}

/// Details of one backup.
pub fn info(snapshot: &Snapshot) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("Backup of {}", snapshot.guild_name))
        .color(COLOR_INFO);

    if let Some(description) = &snapshot.description {
        embed = embed.description(description);
    }

    snapshot_fields(embed, snapshot)
}

/// A backup posted publicly so other admins can reference it.
pub fn shared(snapshot: &Snapshot, shared_by: &str) -> CreateEmbed {
    info(snapshot).footer(CreateEmbedFooter::new(format!(
        "Shared by {}. Only the owner can download or restore it.",
        shared_by
    )))
}

/// The caller's backups in this guild with totals.
///
/// The server's backup schedule, if any, is shown as the first field.
pub fn list(list: &SnapshotList, schedule: Option<&BackupSchedule>) -> CreateEmbed {
    let schedule_text = match schedule {
        Some(schedule) => match schedule.last_run_at {
            Some(last_run_at) => format!(
                "Full backup {}, last run <t:{}:R>",
                schedule.frequency,
                last_run_at.timestamp()
            ),
            None => format!("Full backup {}, not run yet", schedule.frequency),
        },
        None => "None, set one with `/backup schedule`".to_string(),
    };

    let mut embed = CreateEmbed::new()
        .title("📦 Your Backups")
        .field("Schedule", schedule_text, false)
        .color(COLOR_INFO);

    if list.snapshots.is_empty() {
        return embed.description("You have no backups in this server. Create one with `/backup create`.");
    }

    for snapshot in &list.snapshots {
        embed = embed.field(
            format!("{} · {}", snapshot.kind.label(), snapshot.id),
            format!(
                "{}\n{} · <t:{}:f>",
                snapshot.description.as_deref().unwrap_or("No description"),
                format_size(snapshot.size_bytes),
                snapshot.created_at.timestamp()
            ),
            false,
        );
    }

    let breakdown = list
        .stats
        .by_kind
        .iter()
        .map(|(kind, count)| format!("{}: {}", kind.label(), count))
        .collect::<Vec<_>>()
        .join(", ");

    embed.footer(CreateEmbedFooter::new(format!(
        "{}/{} backups · {} total · {}",
        list.stats.count,
        MAX_SNAPSHOTS_PER_OWNER,
        format_size(list.stats.total_size_bytes),
        breakdown
    )))
}

/// Preview of a restore, shown above the Confirm and Cancel buttons.
pub fn plan(snapshot: &Snapshot, plan: &RestorePlan) -> CreateEmbed {
    let settings = if plan.setting_changes.is_empty() {
        "No changes".to_string()
    } else {
        plan.setting_changes
            .iter()
            .map(|change| change.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    CreateEmbed::new()
        .title("🔍 Restore Preview")
        .description(format!(
            "Restoring **{}** backup `{}` of **{}**. Nothing is deleted from the server, \
             existing channels are left unchanged and a `general` channel is never created.",
            snapshot.kind.label(),
            snapshot.id,
            snapshot.guild_name
        ))
        .field("To Add", plan.to_add.to_string(), true)
        .field("To Update", plan.to_update.to_string(), true)
        .field("To Remove", plan.to_remove.to_string(), true)
        .field(
            "Roles",
            format!("{} new, {} updated", plan.roles.to_add, plan.roles.to_update),
            true,
        )
        .field(
            "Channels",
            format!(
                "{} new, {} existing (kept as is)",
                plan.channels.to_add, plan.channels.to_update
            ),
            true,
        )
        .field("Settings", settings, false)
        .color(COLOR_WARNING)
}

/// The preview closed without an answer.
pub fn confirmation_expired() -> CreateEmbed {
    CreateEmbed::new()
        .title("⌛ Restore Expired")
        .description("No response within 5 minutes, nothing was changed.")
        .color(COLOR_ERROR)
}

pub fn restore_cancelled() -> CreateEmbed {
    CreateEmbed::new()
        .title("Restore Cancelled")
        .description("Nothing was changed.")
        .color(COLOR_INFO)
}

pub fn restoring(snapshot_id: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("⏳ Restoring")
        .description(format!("Applying backup `{}`, this can take a while.", snapshot_id))
        .color(COLOR_WARNING)
}

/// Outcome of a restore run. Partial successes list the first failures.
pub fn report(report: &RestoreReport) -> CreateEmbed {
    let (title, color) = if report.is_partial() {
        ("⚠️ Restore Partially Completed", COLOR_WARNING)
    } else {
        ("✅ Restore Completed", COLOR_SUCCESS)
    };

    let mut embed = CreateEmbed::new()
        .title(title)
        .field("Created", report.created_count.to_string(), true)
        .field("Updated", report.updated_count.to_string(), true)
        .field("Settings", report.settings_applied.to_string(), true)
        .field("Skipped", report.skipped_count.to_string(), true)
        .field("Errors", report.errors.len().to_string(), true)
        .field(
            "Duration",
            format!("{:.1}s", report.duration_ms as f64 / 1000.0),
            true,
        )
        .color(color);

    if report.is_partial() {
        embed = embed.field("Failed Items", report.error_summary().join("\n"), false);
    }

    embed
}

pub fn deleted(snapshot_id: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("🗑️ Backup Deleted")
        .description(format!("Backup `{}` was deleted.", snapshot_id))
        .color(COLOR_SUCCESS)
}

pub fn schedule_set(schedule: &BackupSchedule) -> CreateEmbed {
    CreateEmbed::new()
        .title("📅 Backup Schedule Set")
        .description(format!(
            "A full backup of this server will be created {}. Scheduled backups count towards your limit of {}.",
            schedule.frequency, MAX_SNAPSHOTS_PER_OWNER
        ))
        .color(COLOR_SUCCESS)
}

pub fn schedule_disabled(removed: bool) -> CreateEmbed {
    let description = if removed {
        "Scheduled backups for this server are turned off."
    } else {
        "This server had no backup schedule."
    };

    CreateEmbed::new()
        .title("📅 Backup Schedule Disabled")
        .description(description)
        .color(COLOR_INFO)
}
