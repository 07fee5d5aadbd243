//! Restore preview: classifies payload entries against a live guild.

use crate::server::model::{
    guild::{GuildSettingChange, GuildState},
    restore::{RestorePlan, SectionPlan},
    snapshot::SnapshotPayload,
};

/// Name of the implicit role every guild has; never created or counted.
pub const EVERYONE_ROLE_NAME: &str = "@everyone";

/// Computes what restoring `payload` into `state` would add and update.
///
/// Entries are matched by name. Restores never delete, so `to_remove` stays zero.
pub fn plan(state: &GuildState, payload: &SnapshotPayload) -> RestorePlan {
    let mut roles = SectionPlan::default();
    for role in payload
        .roles()
        .iter()
        .filter(|role| role.name != EVERYONE_ROLE_NAME)
    {
        match state.role_by_name(&role.name) {
            Some(_) => roles.to_update += 1,
            None => roles.to_add += 1,
        }
    }

    let mut channels = SectionPlan::default();
    for channel in payload.channels() {
        match state.channel_by_name(&channel.name) {
            Some(_) => channels.to_update += 1,
            None => channels.to_add += 1,
        }
    }

    RestorePlan {
        to_add: roles.to_add + channels.to_add,
        to_update: roles.to_update + channels.to_update,
        to_remove: 0,
        roles,
        channels,
        setting_changes: settings_diff(state, payload),
    }
}

/// Guild-level settings in `payload` that differ from the live guild.
///
/// Kinds without a settings section leave the guild's own values alone.
pub fn settings_diff(state: &GuildState, payload: &SnapshotPayload) -> Vec<GuildSettingChange> {
    let (Some(guild), Some(settings)) = (payload.guild(), payload.settings()) else {
        return Vec::new();
    };
    let mut changes = Vec::new();

    if guild.name != state.name {
        changes.push(GuildSettingChange::Name(guild.name.clone()));
    }
    if guild.description != state.description {
        changes.push(GuildSettingChange::Description(guild.description.clone()));
    }
    if guild.verification_level != state.verification_level {
        changes.push(GuildSettingChange::VerificationLevel(guild.verification_level));
    }
    if guild.explicit_content_filter != state.explicit_content_filter {
        changes.push(GuildSettingChange::ExplicitContentFilter(
            guild.explicit_content_filter,
        ));
    }
    if guild.default_notifications != state.default_notifications {
        changes.push(GuildSettingChange::DefaultNotifications(
            guild.default_notifications,
        ));
    }
    if settings.afk_timeout_seconds != state.afk_timeout_seconds {
        changes.push(GuildSettingChange::AfkTimeout(settings.afk_timeout_seconds));
    }

    changes
}
