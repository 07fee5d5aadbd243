//! Applies a snapshot payload to a live guild.
//!
//! A restore runs in fixed phases: permission check, guild settings, roles, channels.
//! Only the permission check can abort the run. Every later step is tried exactly once
//! and folded into a `RestoreReport`, so one failing role or channel never stops the
//! rest from being applied. Mutations are sent one at a time.

use std::time::Instant;

use crate::server::{
    error::{backup::BackupError, AppError},
    model::{
        guild::{
            ChannelSpec, GuildSettingChange, GuildState, LiveChannel, LiveOverride,
            LiveOverrideTarget, LiveRole, RoleSpec,
        },
        restore::{ItemApplyError, ItemKind, ItemOutcome, RestoreReport},
        snapshot::{ChannelKind, ChannelSection, OverrideTarget, RoleSection, SnapshotPayload},
    },
    service::backup::{
        gateway::GuildGateway,
        planner::{settings_diff, EVERYONE_ROLE_NAME},
    },
};

/// Default channel name a restore never creates.
const RESERVED_CHANNEL_NAME: &str = "general";

/// Restores `payload` into the guild behind `gateway`.
///
/// Existing channels are left untouched and nothing is ever deleted. Roles are
/// matched by name and updated in place when the bot can manage them.
///
/// # Arguments
/// - `gateway` - Access to the target guild
/// - `payload` - Decoded snapshot payload
///
/// # Returns
/// - `Ok(RestoreReport)` - Counts and per-item errors; errors make it a partial success
/// - `Err(AppError::BackupErr(InsufficientPermissions))` - Bot lacks a required
///   capability; nothing was changed
/// - `Err(AppError)` - Reading the guild failed
pub async fn execute(
    gateway: &dyn GuildGateway,
    payload: &SnapshotPayload,
) -> Result<RestoreReport, AppError> {
    let started = Instant::now();
    let state = gateway.fetch_state().await?;

    let missing = state.bot.missing_restore_permissions();
    if !missing.is_empty() {
        return Err(BackupError::InsufficientPermissions { missing }.into());
    }

    let mut report = RestoreReport::default();

    for change in settings_diff(&state, payload) {
        report.record(apply_setting(gateway, &change).await);
    }

    let mut roles = state.roles.clone();
    for role in payload.roles() {
        report.record(apply_role(gateway, &state, &mut roles, role).await);
    }

    let mut channels = state.channels.clone();
    for channel in payload.channels() {
        report.record(apply_channel(gateway, &roles, &mut channels, channel).await);
    }

    report.duration_ms = started.elapsed().as_millis() as u64;

    tracing::info!(
        "Restored {} items into guild {} ({} created, {} updated, {} errors) in {}ms",
        report.restored_count,
        state.guild_id,
        report.created_count,
        report.updated_count,
        report.errors.len(),
        report.duration_ms
    );

    Ok(report)
}

async fn apply_setting(
    gateway: &dyn GuildGateway,
    change: &GuildSettingChange,
) -> Result<ItemOutcome, ItemApplyError> {
    gateway
        .edit_guild(change)
        .await
        .map_err(|e| ItemApplyError::new(ItemKind::Setting, change.label(), e.to_string()))?;

    Ok(ItemOutcome::SettingApplied)
}

/// Upserts one role by name.
///
/// `roles` holds the live roles plus those created earlier in this run, so a payload
/// listing the same name twice never creates a duplicate.
async fn apply_role(
    gateway: &dyn GuildGateway,
    state: &GuildState,
    roles: &mut Vec<LiveRole>,
    role: &RoleSection,
) -> Result<ItemOutcome, ItemApplyError> {
    if role.name == EVERYONE_ROLE_NAME {
        return Ok(ItemOutcome::Skipped);
    }

    if role.position >= state.bot.highest_role_position {
        return Err(ItemApplyError::new(
            ItemKind::Role,
            &role.name,
            "position is at or above the bot's highest role",
        ));
    }

    let spec = RoleSpec {
        name: role.name.clone(),
        color: role.color,
        hoisted: role.hoisted,
        mentionable: role.mentionable,
        permission_set: role.permission_set,
    };

    if let Some(existing) = roles.iter().find(|live| live.name == role.name) {
        if !state.is_editable(existing) {
            return Err(ItemApplyError::new(
                ItemKind::Role,
                &role.name,
                "existing role is managed by an integration or above the bot's highest role",
            ));
        }

        gateway
            .edit_role(existing.id, &spec)
            .await
            .map_err(|e| ItemApplyError::new(ItemKind::Role, &role.name, e.to_string()))?;

        return Ok(ItemOutcome::Updated);
    }

    let created = gateway
        .create_role(&spec)
        .await
        .map_err(|e| ItemApplyError::new(ItemKind::Role, &role.name, e.to_string()))?;
    roles.push(created);

    Ok(ItemOutcome::Created)
}

/// Creates one channel unless a channel with its name already exists.
///
/// The parent category and role overrides are resolved by name against `channels` and
/// `roles`; role overrides naming a role that doesn't exist are dropped.
async fn apply_channel(
    gateway: &dyn GuildGateway,
    roles: &[LiveRole],
    channels: &mut Vec<LiveChannel>,
    channel: &ChannelSection,
) -> Result<ItemOutcome, ItemApplyError> {
    if channel.name.eq_ignore_ascii_case(RESERVED_CHANNEL_NAME)
        || channels.iter().any(|live| live.name == channel.name)
    {
        return Ok(ItemOutcome::Skipped);
    }

    let parent_id = channel.parent_name.as_ref().and_then(|parent| {
        channels
            .iter()
            .find(|live| live.kind == ChannelKind::Category && &live.name == parent)
            .map(|live| live.id)
    });

    let overrides = channel
        .permission_overrides
        .iter()
        .filter_map(|section| {
            let target = match &section.target {
                OverrideTarget::Role { name } => LiveOverrideTarget::Role(
                    roles.iter().find(|role| &role.name == name)?.id,
                ),
                OverrideTarget::Member { user_id } => LiveOverrideTarget::Member(*user_id),
            };

            Some(LiveOverride {
                target,
                allow: section.allow,
                deny: section.deny,
            })
        })
        .collect();

    let is_voice = channel.kind.is_voice();
    let spec = ChannelSpec {
        name: channel.name.clone(),
        kind: channel.kind,
        parent_id,
        position: channel.position,
        topic: channel.topic.clone(),
        nsfw: channel.nsfw,
        bitrate: channel.bitrate.filter(|_| is_voice),
        user_limit: channel.user_limit.filter(|_| is_voice),
        slow_mode_seconds: channel.slow_mode_seconds,
        overrides,
    };

    let created = gateway
        .create_channel(&spec)
        .await
        .map_err(|e| ItemApplyError::new(ItemKind::Channel, &channel.name, e.to_string()))?;
    channels.push(created);

    Ok(ItemOutcome::Created)
}

#[cfg(test)]
mod tests {
    use serenity::all::Permissions;

    use super::*;
    use crate::server::{
        model::snapshot::{PermissionOverrideSection, SnapshotKind},
        service::backup::{
            fake::{
                category, guild_state, role, text_channel, voice_channel, FakeGateway, GUILD_ID,
            },
            serializer::serialize,
        },
    };

    fn roles_payload(names: &[&str]) -> SnapshotPayload {
        let mut source = guild_state();
        for (i, name) in names.iter().enumerate() {
            source.roles.push(role(100 + i as u64, name, (names.len() - i) as u16));
        }

        serialize(&source, SnapshotKind::Roles)
    }

    /// Tests the permission gate.
    ///
    /// Verifies that a bot without Manage Roles is rejected before any mutation.
    ///
    /// Expected: Err(InsufficientPermissions(["Manage Roles"])) and zero mutations
    #[tokio::test]
    async fn rejects_missing_permissions() {
        let mut state = guild_state();
        state.bot.permissions = Permissions::MANAGE_GUILD | Permissions::MANAGE_CHANNELS;
        let gateway = FakeGateway::new(state);

        let result = execute(&gateway, &roles_payload(&["Admin", "Member"])).await;

        match result {
            Err(AppError::BackupErr(BackupError::InsufficientPermissions { missing })) => {
                assert_eq!(missing, vec!["Manage Roles".to_string()]);
            }
            other => panic!("expected InsufficientPermissions, got {:?}", other),
        }
        assert_eq!(gateway.mutations(), 0);
        assert_eq!(gateway.state().roles.len(), 1);
    }

    /// Tests restoring the same payload twice.
    ///
    /// Verifies that the second run updates the roles created by the first instead of
    /// creating duplicates.
    ///
    /// Expected: first run 3 created, second run 3 updated, one role per name
    #[tokio::test]
    async fn repeat_restore_updates_roles() {
        let gateway = FakeGateway::new(guild_state());
        let payload = roles_payload(&["Admin", "Moderator", "Member"]);

        let first = execute(&gateway, &payload).await.unwrap();
        let second = execute(&gateway, &payload).await.unwrap();

        assert_eq!(first.created_count, 3);
        assert_eq!(first.updated_count, 0);
        assert_eq!(second.created_count, 0);
        assert_eq!(second.updated_count, 3);
        assert_eq!(second.restored_count, 3);

        let state = gateway.state();
        for name in ["Admin", "Moderator", "Member"] {
            assert_eq!(state.roles.iter().filter(|r| r.name == name).count(), 1);
        }
    }

    /// Tests that a restore leaves unrelated roles and channels in place.
    ///
    /// Expected: pre-existing role and channel still present after restore
    #[tokio::test]
    async fn never_removes_live_entries() {
        let mut source = guild_state();
        source.roles.push(role(10, "Admin", 1));
        source.channels.push(text_channel(20, "rules", 0, None));
        let payload = serialize(&source, SnapshotKind::Full);

        let mut target = guild_state();
        target.roles.push(role(30, "Unrelated", 2));
        target.channels.push(text_channel(40, "off-topic", 0, None));
        let gateway = FakeGateway::new(target);

        let report = execute(&gateway, &payload).await.unwrap();

        assert_eq!(report.created_count, 2);
        let state = gateway.state();
        assert!(state.role_by_name("Unrelated").is_some());
        assert!(state.channel_by_name("off-topic").is_some());
        assert_eq!(state.roles.len(), 3);
        assert_eq!(state.channels.len(), 2);
    }

    /// Tests partial failure isolation.
    ///
    /// A 5-role payload includes a name that collides with a live role above the bot.
    ///
    /// Expected: 4 successes and 1 error, run reported as partial
    #[tokio::test]
    async fn isolates_failing_role() {
        let payload = roles_payload(&["Owner", "Admin", "Moderator", "Helper", "Member"]);
        let mut target = guild_state();
        target.roles.push(role(30, "Owner", 60));
        let gateway = FakeGateway::new(target);

        let report = execute(&gateway, &payload).await.unwrap();

        assert_eq!(report.restored_count, 4);
        assert_eq!(report.created_count, 4);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ItemKind::Role);
        assert_eq!(report.errors[0].name, "Owner");
        assert!(report.is_partial());
    }

    /// Tests that gateway failures are collected per item.
    ///
    /// Expected: failing role reported, the other role and the channel still created
    #[tokio::test]
    async fn collects_gateway_failures() {
        let mut source = guild_state();
        source.roles.push(role(10, "Admin", 2));
        source.roles.push(role(11, "Member", 1));
        source.channels.push(text_channel(20, "rules", 0, None));
        let payload = serialize(&source, SnapshotKind::Full);
        let gateway = FakeGateway::new(guild_state()).failing_on("Admin");

        let report = execute(&gateway, &payload).await.unwrap();

        assert_eq!(report.created_count, 2);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].reason.contains("Missing Access"));
    }

    /// Tests roles recorded at or above the bot's highest position.
    ///
    /// Expected: role rejected without a gateway call
    #[tokio::test]
    async fn rejects_roles_above_bot() {
        let mut source = guild_state();
        source.roles.push(role(10, "Founder", 80));
        let payload = serialize(&source, SnapshotKind::Roles);
        let gateway = FakeGateway::new(guild_state());

        let report = execute(&gateway, &payload).await.unwrap();

        assert_eq!(report.restored_count, 0);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(gateway.mutations(), 0);
    }

    /// Tests applying differing guild settings.
    ///
    /// Expected: each differing field applied independently, failures recorded
    #[tokio::test]
    async fn applies_settings_independently() {
        let mut source = guild_state();
        source.name = "Restored Guild".to_string();
        source.verification_level = 2;
        source.afk_timeout_seconds = 900;
        let payload = serialize(&source, SnapshotKind::Settings);
        let gateway = FakeGateway::new(guild_state()).failing_on("verification level");

        let report = execute(&gateway, &payload).await.unwrap();

        assert_eq!(report.settings_applied, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ItemKind::Setting);
        let state = gateway.state();
        assert_eq!(state.name, "Restored Guild");
        assert_eq!(state.afk_timeout_seconds, 900);
        assert_eq!(state.verification_level, 1);
    }

    /// Tests that a roles-only restore never touches guild-level values.
    ///
    /// The source guild has a different name and verification level than the target.
    ///
    /// Expected: role created, no settings applied, target name and level unchanged
    #[tokio::test]
    async fn roles_restore_keeps_guild_settings() {
        let mut source = guild_state();
        source.name = "Old Name".to_string();
        source.verification_level = 4;
        source.roles.push(role(10, "Admin", 1));
        let payload = serialize(&source, SnapshotKind::Roles);
        let mut target = guild_state();
        target.name = "Renamed Since".to_string();
        let gateway = FakeGateway::new(target);

        let report = execute(&gateway, &payload).await.unwrap();

        assert_eq!(report.created_count, 1);
        assert_eq!(report.settings_applied, 0);
        let state = gateway.state();
        assert_eq!(state.name, "Renamed Since");
        assert_eq!(state.verification_level, 1);
    }

    /// Tests channel creation rules.
    ///
    /// Verifies that existing and `general` channels are skipped, categories are
    /// created before their children and bound as parents, role overrides are re-bound
    /// to the target guild's role ids and voice attributes are kept.
    ///
    /// Expected: category, child and voice channel created, two channels skipped
    #[tokio::test]
    async fn creates_missing_channels() {
        let mut source = guild_state();
        source.roles.push(role(10, "Staff", 1));
        source.channels.push(category(20, "Staff Area", 0));
        let mut child = text_channel(21, "staff-chat", 1, Some(20));
        child.overrides = vec![LiveOverride {
            target: LiveOverrideTarget::Role(10),
            allow: 1024,
            deny: 0,
        }];
        source.channels.push(child);
        source.channels.push(text_channel(22, "General", 2, None));
        source.channels.push(text_channel(23, "rules", 3, None));
        source.channels.push(voice_channel(24, "Lounge", 4));
        let payload = serialize(&source, SnapshotKind::Full);

        let mut target = guild_state();
        target.channels.push(text_channel(40, "rules", 0, None));
        let gateway = FakeGateway::new(target);

        let report = execute(&gateway, &payload).await.unwrap();

        assert_eq!(report.created_count, 4);
        assert_eq!(report.skipped_count, 2);
        assert!(report.errors.is_empty());

        let state = gateway.state();
        let staff_role = state.role_by_name("Staff").unwrap();
        let parent = state.channel_by_name("Staff Area").unwrap();
        let chat = state.channel_by_name("staff-chat").unwrap();
        assert_eq!(chat.parent_id, Some(parent.id));
        assert_eq!(
            chat.overrides,
            vec![LiveOverride {
                target: LiveOverrideTarget::Role(staff_role.id),
                allow: 1024,
                deny: 0,
            }]
        );
        let lounge = state.channel_by_name("Lounge").unwrap();
        assert_eq!(lounge.bitrate, Some(64000));
        assert_eq!(lounge.user_limit, Some(10));
        assert!(state.channel_by_name("General").is_none());
    }

    /// Tests that overrides for roles missing from the target guild are dropped.
    ///
    /// Expected: only the `@everyone` override survives, re-bound to the target guild
    #[tokio::test]
    async fn drops_unresolvable_overrides() {
        let payload = SnapshotPayload::Channels {
            channels: vec![ChannelSection {
                name: "private".to_string(),
                kind: ChannelKind::Text,
                parent_name: None,
                position: 0,
                topic: None,
                nsfw: false,
                bitrate: None,
                user_limit: None,
                slow_mode_seconds: 0,
                permission_overrides: vec![
                    PermissionOverrideSection {
                        target: OverrideTarget::Role {
                            name: "@everyone".to_string(),
                        },
                        allow: 0,
                        deny: 1024,
                    },
                    PermissionOverrideSection {
                        target: OverrideTarget::Role {
                            name: "Ghost".to_string(),
                        },
                        allow: 1024,
                        deny: 0,
                    },
                ],
            }],
        };
        let gateway = FakeGateway::new(guild_state());

        execute(&gateway, &payload).await.unwrap();

        let state = gateway.state();
        let private = state.channel_by_name("private").unwrap();
        assert_eq!(
            private.overrides,
            vec![LiveOverride {
                target: LiveOverrideTarget::Role(GUILD_ID),
                allow: 0,
                deny: 1024,
            }]
        );
    }
}
