//! Live guild state as seen by the backup engine.
//!
//! `GuildState` is a plain snapshot of what the bot can read from Discord at a given
//! moment. The serializer, planner and executor only ever work on this type so they
//! can be exercised without a gateway connection.

use serenity::all::Permissions;

use crate::server::model::snapshot::ChannelKind;

#[derive(Debug, Clone, PartialEq)]
pub struct LiveRole {
    pub id: u64,
    pub name: String,
    pub color: u32,
    pub hoisted: bool,
    pub mentionable: bool,
    pub managed: bool,
    pub permission_set: u64,
    pub position: u16,
}

/// Permission override on a live channel, with role targets still keyed by id.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveOverrideTarget {
    Role(u64),
    Member(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveOverride {
    pub target: LiveOverrideTarget,
    pub allow: u64,
    pub deny: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveChannel {
    pub id: u64,
    pub name: String,
    pub kind: ChannelKind,
    pub parent_id: Option<u64>,
    pub position: u16,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub bitrate: Option<u32>,
    pub user_limit: Option<u32>,
    pub slow_mode_seconds: u16,
    pub overrides: Vec<LiveOverride>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveEmoji {
    pub name: String,
    pub image_ref: String,
    pub animated: bool,
}

/// The bot's own standing in the guild.
#[derive(Debug, Clone, PartialEq)]
pub struct BotMember {
    pub permissions: Permissions,
    pub highest_role_position: u16,
}

impl BotMember {
    /// Returns the capability names the bot lacks for a restore.
    ///
    /// Administrator implies every capability.
    pub fn missing_restore_permissions(&self) -> Vec<String> {
        if self.permissions.administrator() {
            return Vec::new();
        }

        [
            (Permissions::MANAGE_GUILD, "Manage Server"),
            (Permissions::MANAGE_ROLES, "Manage Roles"),
            (Permissions::MANAGE_CHANNELS, "Manage Channels"),
        ]
        .into_iter()
        .filter(|(permission, _)| !self.permissions.contains(*permission))
        .map(|(_, name)| name.to_string())
        .collect()
    }
}

/// Guild-level values that a restore can write back.
#[derive(Debug, Clone, PartialEq)]
pub enum GuildSettingChange {
    Name(String),
    Description(Option<String>),
    VerificationLevel(u8),
    ExplicitContentFilter(u8),
    DefaultNotifications(u8),
    AfkTimeout(u32),
}

impl GuildSettingChange {
    /// Human-readable label used in previews and error lists.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Description(_) => "description",
            Self::VerificationLevel(_) => "verification level",
            Self::ExplicitContentFilter(_) => "explicit content filter",
            Self::DefaultNotifications(_) => "default notifications",
            Self::AfkTimeout(_) => "AFK timeout",
        }
    }
}

/// Desired state for a role the executor creates or edits.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSpec {
    pub name: String,
    pub color: u32,
    pub hoisted: bool,
    pub mentionable: bool,
    pub permission_set: u64,
}

/// Channel to be created by the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSpec {
    pub name: String,
    pub kind: ChannelKind,
    pub parent_id: Option<u64>,
    pub position: u16,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub bitrate: Option<u32>,
    pub user_limit: Option<u32>,
    pub slow_mode_seconds: u16,
    pub overrides: Vec<LiveOverride>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildState {
    pub guild_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub icon_ref: Option<String>,
    pub banner_ref: Option<String>,
    pub verification_level: u8,
    pub explicit_content_filter: u8,
    pub default_notifications: u8,
    pub afk_timeout_seconds: u32,
    pub afk_channel_id: Option<u64>,
    pub system_channel_id: Option<u64>,
    pub rules_channel_id: Option<u64>,
    pub public_updates_channel_id: Option<u64>,
    pub boost_tier: u8,
    pub boost_count: u64,
    pub roles: Vec<LiveRole>,
    pub channels: Vec<LiveChannel>,
    pub emojis: Vec<LiveEmoji>,
    pub bot: BotMember,
}

impl GuildState {
    /// The `@everyone` role shares its id with the guild.
    pub fn everyone_role_id(&self) -> u64 {
        self.guild_id
    }

    pub fn role_by_name(&self, name: &str) -> Option<&LiveRole> {
        self.roles.iter().find(|role| role.name == name)
    }

    pub fn role_by_id(&self, id: u64) -> Option<&LiveRole> {
        self.roles.iter().find(|role| role.id == id)
    }

    pub fn channel_by_name(&self, name: &str) -> Option<&LiveChannel> {
        self.channels.iter().find(|channel| channel.name == name)
    }

    pub fn channel_by_id(&self, id: u64) -> Option<&LiveChannel> {
        self.channels.iter().find(|channel| channel.id == id)
    }

    pub fn channel_name(&self, id: Option<u64>) -> Option<String> {
        id.and_then(|id| self.channel_by_id(id))
            .map(|channel| channel.name.clone())
    }

    /// Whether the bot may edit a role: not integration-managed and strictly below
    /// the bot's highest role.
    pub fn is_editable(&self, role: &LiveRole) -> bool {
        !role.managed && role.position < self.bot.highest_role_position
    }
}
