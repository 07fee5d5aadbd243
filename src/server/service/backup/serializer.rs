//! Builds snapshot payloads from live guild state.

use crate::server::model::{
    guild::{GuildState, LiveChannel, LiveOverrideTarget},
    snapshot::{
        ChannelKind, ChannelSection, EmojiSection, GuildSection, OverrideTarget,
        PermissionOverrideSection, RoleSection, SettingsSection, SnapshotKind, SnapshotPayload,
    },
};

/// Captures the sections of `state` that `kind` calls for.
///
/// Pure transform; absent optional attributes stay `None`. The guild header is only
/// captured alongside settings.
pub fn serialize(state: &GuildState, kind: SnapshotKind) -> SnapshotPayload {
    match kind {
        SnapshotKind::Full => SnapshotPayload::Full {
            guild: guild_section(state),
            roles: role_sections(state),
            channels: channel_sections(state),
            emojis: emoji_sections(state),
            settings: settings_section(state),
        },
        SnapshotKind::Settings => SnapshotPayload::Settings {
            guild: guild_section(state),
            settings: settings_section(state),
        },
        SnapshotKind::Roles => SnapshotPayload::Roles {
            roles: role_sections(state),
        },
        SnapshotKind::Channels => SnapshotPayload::Channels {
            channels: channel_sections(state),
        },
        SnapshotKind::Custom => SnapshotPayload::Custom {
            guild: guild_section(state),
            roles: role_sections(state),
            settings: settings_section(state),
        },
    }
}

fn guild_section(state: &GuildState) -> GuildSection {
    GuildSection {
        name: state.name.clone(),
        description: state.description.clone(),
        icon_ref: state.icon_ref.clone(),
        banner_ref: state.banner_ref.clone(),
        verification_level: state.verification_level,
        explicit_content_filter: state.explicit_content_filter,
        default_notifications: state.default_notifications,
    }
}

/// Roles highest first, without `@everyone` and integration-managed roles.
fn role_sections(state: &GuildState) -> Vec<RoleSection> {
    let mut roles: Vec<RoleSection> = state
        .roles
        .iter()
        .filter(|role| role.id != state.everyone_role_id() && !role.managed)
        .map(|role| RoleSection {
            name: role.name.clone(),
            color: role.color,
            hoisted: role.hoisted,
            mentionable: role.mentionable,
            permission_set: role.permission_set,
            position: role.position,
        })
        .collect();

    roles.sort_by(|a, b| b.position.cmp(&a.position));

    roles
}

/// Channels with categories first so parents exist before their children on restore.
fn channel_sections(state: &GuildState) -> Vec<ChannelSection> {
    let mut channels: Vec<&LiveChannel> = state.channels.iter().collect();
    channels.sort_by_key(|channel| (channel.kind != ChannelKind::Category, channel.position));

    channels
        .into_iter()
        .map(|channel| ChannelSection {
            name: channel.name.clone(),
            kind: channel.kind,
            parent_name: state.channel_name(channel.parent_id),
            position: channel.position,
            topic: channel.topic.clone(),
            nsfw: channel.nsfw,
            bitrate: channel.bitrate,
            user_limit: channel.user_limit,
            slow_mode_seconds: channel.slow_mode_seconds,
            permission_overrides: channel
                .overrides
                .iter()
                .filter_map(|live| {
                    let target = match live.target {
                        LiveOverrideTarget::Role(id) => OverrideTarget::Role {
                            name: state.role_by_id(id)?.name.clone(),
                        },
                        LiveOverrideTarget::Member(user_id) => OverrideTarget::Member { user_id },
                    };

                    Some(PermissionOverrideSection {
                        target,
                        allow: live.allow,
                        deny: live.deny,
                    })
                })
                .collect(),
        })
        .collect()
}

fn emoji_sections(state: &GuildState) -> Vec<EmojiSection> {
    state
        .emojis
        .iter()
        .map(|emoji| EmojiSection {
            name: emoji.name.clone(),
            image_ref: emoji.image_ref.clone(),
            animated: emoji.animated,
        })
        .collect()
}

fn settings_section(state: &GuildState) -> SettingsSection {
    SettingsSection {
        system_channel_name: state.channel_name(state.system_channel_id),
        rules_channel_name: state.channel_name(state.rules_channel_id),
        public_updates_channel_name: state.channel_name(state.public_updates_channel_id),
        afk_channel_name: state.channel_name(state.afk_channel_id),
        afk_timeout_seconds: state.afk_timeout_seconds,
        boost_tier: state.boost_tier,
        boost_count: state.boost_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::service::backup::fake::{category, guild_state, role, text_channel};
    use crate::server::model::guild::LiveOverride;

    /// Tests which sections each kind captures.
    ///
    /// Expected: payload sections match the kind's policy, `custom` holds roles and settings
    #[test]
    fn captures_sections_by_kind() {
        let mut state = guild_state();
        state.roles.push(role(10, "Admin", 2));
        state.channels.push(text_channel(20, "rules", 0, None));

        for kind in SnapshotKind::ALL {
            let payload = serialize(&state, kind);

            assert_eq!(payload.kind(), kind);
            assert_eq!(!payload.roles().is_empty(), kind.captures_roles());
            assert_eq!(!payload.channels().is_empty(), kind.captures_channels());
            assert_eq!(payload.settings().is_some(), kind.captures_settings());
            assert_eq!(payload.guild().is_some(), kind.captures_settings());
        }
    }

    /// Tests role filtering and ordering.
    ///
    /// Verifies that `@everyone` and managed roles are left out and the rest are
    /// stored highest position first.
    ///
    /// Expected: Admin, Moderator
    #[test]
    fn orders_roles_and_skips_unmanageable() {
        let mut state = guild_state();
        state.roles.push(role(10, "Moderator", 1));
        state.roles.push(role(11, "Admin", 3));
        let mut bot_role = role(12, "Integration", 2);
        bot_role.managed = true;
        state.roles.push(bot_role);

        let payload = serialize(&state, SnapshotKind::Roles);

        let names: Vec<&str> = payload.roles().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Admin", "Moderator"]);
    }

    /// Tests channel ordering and name resolution.
    ///
    /// Verifies that categories come first, parent ids become names and role
    /// overrides become role names while overrides on unknown roles are dropped.
    ///
    /// Expected: category first, child with parent name and one resolved role override
    #[test]
    fn resolves_channel_references() {
        let mut state = guild_state();
        state.roles.push(role(10, "Staff", 1));
        let mut child = text_channel(21, "staff-chat", 0, Some(20));
        child.overrides = vec![
            LiveOverride {
                target: LiveOverrideTarget::Role(10),
                allow: 1024,
                deny: 0,
            },
            LiveOverride {
                target: LiveOverrideTarget::Role(999),
                allow: 0,
                deny: 1024,
            },
            LiveOverride {
                target: LiveOverrideTarget::Member(77),
                allow: 2048,
                deny: 0,
            },
        ];
        state.channels.push(child);
        state.channels.push(category(20, "Staff", 5));
        state.system_channel_id = Some(21);

        let payload = serialize(&state, SnapshotKind::Full);

        let channels = payload.channels();
        assert_eq!(channels[0].name, "Staff");
        assert_eq!(channels[0].kind, ChannelKind::Category);
        assert_eq!(channels[1].parent_name.as_deref(), Some("Staff"));
        assert_eq!(
            channels[1].permission_overrides,
            vec![
                PermissionOverrideSection {
                    target: OverrideTarget::Role {
                        name: "Staff".to_string()
                    },
                    allow: 1024,
                    deny: 0,
                },
                PermissionOverrideSection {
                    target: OverrideTarget::Member { user_id: 77 },
                    allow: 2048,
                    deny: 0,
                },
            ]
        );
        let settings = payload.settings().unwrap();
        assert_eq!(settings.system_channel_name.as_deref(), Some("staff-chat"));
        assert_eq!(settings.afk_channel_name, None);
    }
}
