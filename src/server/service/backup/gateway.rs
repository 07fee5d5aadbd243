//! Access to a live guild for the backup engine.
//!
//! `GuildGateway` is the only way the engine reads or mutates a guild. The serenity
//! implementation talks to Discord's REST API; tests drive the engine through an
//! in-memory implementation instead.

use serenity::{
    all::{
        AfkTimeout, ChannelId, ChannelType, CreateChannel, DefaultMessageNotificationLevel,
        EditGuild, EditRole, ExplicitContentFilter, GuildChannel, GuildId, Member, PartialGuild,
        PermissionOverwrite, PermissionOverwriteType, Permissions, Role, RoleId, UserId,
        VerificationLevel,
    },
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    error::AppError,
    model::{
        guild::{
            BotMember, ChannelSpec, GuildSettingChange, GuildState, LiveChannel, LiveEmoji,
            LiveOverride, LiveOverrideTarget, LiveRole, RoleSpec,
        },
        snapshot::ChannelKind,
    },
};

/// Reason attached to every mutation in the guild's audit log.
const AUDIT_LOG_REASON: &str = "Backup restore";

/// AFK timeout Discord applies when none is configured.
const DEFAULT_AFK_TIMEOUT_SECONDS: u32 = 300;

#[async_trait]
pub trait GuildGateway: Send + Sync {
    /// Reads the guild's current roles, channels, emojis, settings and the bot's standing.
    async fn fetch_state(&self) -> Result<GuildState, AppError>;

    /// Applies a single guild-level setting.
    async fn edit_guild(&self, change: &GuildSettingChange) -> Result<(), AppError>;

    async fn edit_role(&self, role_id: u64, role: &RoleSpec) -> Result<(), AppError>;

    async fn create_role(&self, role: &RoleSpec) -> Result<LiveRole, AppError>;

    async fn create_channel(&self, channel: &ChannelSpec) -> Result<LiveChannel, AppError>;
}

/// Gateway backed by the bot's Discord HTTP client.
pub struct SerenityGuildGateway {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl SerenityGuildGateway {
    pub fn new(http: Arc<Http>, guild_id: u64) -> Self {
        Self {
            http,
            guild_id: GuildId::new(guild_id),
        }
    }
}

#[async_trait]
impl GuildGateway for SerenityGuildGateway {
    async fn fetch_state(&self) -> Result<GuildState, AppError> {
        let guild = self.http.get_guild(self.guild_id).await?;
        let channels = self.http.get_channels(self.guild_id).await?;
        let bot_user = self.http.get_current_user().await?;
        let bot = self.http.get_member(self.guild_id, bot_user.id).await?;

        Ok(guild_state_from_discord(&guild, &channels, &bot))
    }

    async fn edit_guild(&self, change: &GuildSettingChange) -> Result<(), AppError> {
        let builder = EditGuild::new().audit_log_reason(AUDIT_LOG_REASON);
        let builder = match change {
            GuildSettingChange::Name(name) => builder.name(name.clone()),
            GuildSettingChange::Description(description) => {
                builder.description(description.clone().unwrap_or_default())
            }
            GuildSettingChange::VerificationLevel(level) => {
                builder.verification_level(VerificationLevel::from(*level))
            }
            GuildSettingChange::ExplicitContentFilter(filter) => {
                builder.explicit_content_filter(Some(ExplicitContentFilter::from(*filter)))
            }
            GuildSettingChange::DefaultNotifications(level) => builder
                .default_message_notifications(Some(DefaultMessageNotificationLevel::from(
                    *level,
                ))),
            GuildSettingChange::AfkTimeout(seconds) => {
                let seconds = u16::try_from(*seconds).unwrap_or(u16::MAX);
                builder.afk_timeout(AfkTimeout::from(seconds))
            }
        };

        self.guild_id.edit(&self.http, builder).await?;

        Ok(())
    }

    async fn edit_role(&self, role_id: u64, role: &RoleSpec) -> Result<(), AppError> {
        self.guild_id
            .edit_role(&self.http, RoleId::new(role_id), edit_role_builder(role))
            .await?;

        Ok(())
    }

    async fn create_role(&self, role: &RoleSpec) -> Result<LiveRole, AppError> {
        let created = self
            .guild_id
            .create_role(&self.http, edit_role_builder(role))
            .await?;

        Ok(live_role_from(&created))
    }

    async fn create_channel(&self, channel: &ChannelSpec) -> Result<LiveChannel, AppError> {
        let mut builder = CreateChannel::new(channel.name.clone())
            .kind(channel_type_from(channel.kind))
            .position(channel.position)
            .nsfw(channel.nsfw)
            .permissions(channel.overrides.iter().map(permission_overwrite_from))
            .audit_log_reason(AUDIT_LOG_REASON);

        if let Some(topic) = &channel.topic {
            builder = builder.topic(topic.clone());
        }
        if channel.slow_mode_seconds > 0 {
            builder = builder.rate_limit_per_user(channel.slow_mode_seconds);
        }
        if channel.kind.is_voice() {
            if let Some(bitrate) = channel.bitrate {
                builder = builder.bitrate(bitrate);
            }
            if let Some(user_limit) = channel.user_limit {
                builder = builder.user_limit(user_limit);
            }
        }
        if let Some(parent_id) = channel.parent_id {
            builder = builder.category(ChannelId::new(parent_id));
        }

        let created = self.guild_id.create_channel(&self.http, builder).await?;

        live_channel_from(&created).ok_or_else(|| {
            AppError::InternalError(format!(
                "Discord created channel {} with an unsupported type",
                created.id
            ))
        })
    }
}

fn edit_role_builder(role: &RoleSpec) -> EditRole<'static> {
    EditRole::new()
        .name(role.name.clone())
        .colour(role.color)
        .hoist(role.hoisted)
        .mentionable(role.mentionable)
        .permissions(Permissions::from_bits_truncate(role.permission_set))
        .audit_log_reason(AUDIT_LOG_REASON)
}

fn permission_overwrite_from(live: &LiveOverride) -> PermissionOverwrite {
    let kind = match live.target {
        LiveOverrideTarget::Role(id) => PermissionOverwriteType::Role(RoleId::new(id)),
        LiveOverrideTarget::Member(id) => PermissionOverwriteType::Member(UserId::new(id)),
    };

    PermissionOverwrite {
        allow: Permissions::from_bits_truncate(live.allow),
        deny: Permissions::from_bits_truncate(live.deny),
        kind,
    }
}

/// Builds the engine's view of a guild from Discord REST responses.
///
/// The bot's effective permissions are the union of `@everyone` and its roles'
/// permissions, or every permission when the bot owns the guild. Its highest
/// position is the maximum position among its roles.
///
/// # Arguments
/// - `guild` - Response of `GET /guilds/{guild.id}`
/// - `channels` - Response of `GET /guilds/{guild.id}/channels`
/// - `bot` - The bot's own member record
pub fn guild_state_from_discord(
    guild: &PartialGuild,
    channels: &[GuildChannel],
    bot: &Member,
) -> GuildState {
    let guild_id = guild.id.get();

    let mut roles: Vec<LiveRole> = guild.roles.values().map(live_role_from).collect();
    roles.sort_by(|a, b| b.position.cmp(&a.position).then(a.id.cmp(&b.id)));

    let mut live_channels: Vec<LiveChannel> =
        channels.iter().filter_map(live_channel_from).collect();
    live_channels.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));

    let mut emojis: Vec<LiveEmoji> = guild
        .emojis
        .values()
        .map(|emoji| LiveEmoji {
            name: emoji.name.clone(),
            image_ref: emoji.url(),
            animated: emoji.animated,
        })
        .collect();
    emojis.sort_by(|a, b| a.name.cmp(&b.name));

    let afk = guild
        .afk_metadata
        .as_ref()
        .map(|afk| (afk.afk_channel_id.get(), u16::from(afk.afk_timeout) as u32));

    GuildState {
        guild_id,
        name: guild.name.clone(),
        description: guild.description.clone(),
        icon_ref: guild.icon_url(),
        banner_ref: guild.banner.as_ref().map(|hash| {
            format!("https://cdn.discordapp.com/banners/{}/{}.png", guild_id, hash)
        }),
        verification_level: u8::from(guild.verification_level),
        explicit_content_filter: u8::from(guild.explicit_content_filter),
        default_notifications: u8::from(guild.default_message_notifications),
        afk_timeout_seconds: afk
            .map(|(_, timeout)| timeout)
            .unwrap_or(DEFAULT_AFK_TIMEOUT_SECONDS),
        afk_channel_id: afk.map(|(channel_id, _)| channel_id),
        system_channel_id: guild.system_channel_id.map(|id| id.get()),
        rules_channel_id: guild.rules_channel_id.map(|id| id.get()),
        public_updates_channel_id: guild.public_updates_channel_id.map(|id| id.get()),
        boost_tier: u8::from(guild.premium_tier),
        boost_count: guild.premium_subscription_count.unwrap_or(0),
        bot: bot_member_from(guild, bot),
        roles,
        channels: live_channels,
        emojis,
    }
}

fn bot_member_from(guild: &PartialGuild, bot: &Member) -> BotMember {
    if guild.owner_id == bot.user.id {
        return BotMember {
            permissions: Permissions::all(),
            highest_role_position: bot_highest_position(guild, bot),
        };
    }

    let everyone = guild
        .roles
        .get(&RoleId::new(guild.id.get()))
        .map(|role| role.permissions)
        .unwrap_or_else(Permissions::empty);

    let permissions = bot
        .roles
        .iter()
        .filter_map(|role_id| guild.roles.get(role_id))
        .fold(everyone, |acc, role| acc | role.permissions);

    BotMember {
        permissions,
        highest_role_position: bot_highest_position(guild, bot),
    }
}

fn bot_highest_position(guild: &PartialGuild, bot: &Member) -> u16 {
    bot.roles
        .iter()
        .filter_map(|role_id| guild.roles.get(role_id))
        .map(|role| role.position)
        .max()
        .unwrap_or(0)
}

fn live_role_from(role: &Role) -> LiveRole {
    LiveRole {
        id: role.id.get(),
        name: role.name.clone(),
        color: role.colour.0,
        hoisted: role.hoist,
        mentionable: role.mentionable,
        managed: role.managed,
        permission_set: role.permissions.bits(),
        position: role.position,
    }
}

/// Converts a channel, returning `None` for types a snapshot can't recreate
/// (threads, directory channels).
fn live_channel_from(channel: &GuildChannel) -> Option<LiveChannel> {
    let kind = channel_kind_from(channel.kind)?;

    let overrides = channel
        .permission_overwrites
        .iter()
        .filter_map(|overwrite| {
            let target = match overwrite.kind {
                PermissionOverwriteType::Role(id) => LiveOverrideTarget::Role(id.get()),
                PermissionOverwriteType::Member(id) => LiveOverrideTarget::Member(id.get()),
                _ => return None,
            };

            Some(LiveOverride {
                target,
                allow: overwrite.allow.bits(),
                deny: overwrite.deny.bits(),
            })
        })
        .collect();

    Some(LiveChannel {
        id: channel.id.get(),
        name: channel.name.clone(),
        kind,
        parent_id: channel.parent_id.map(|id| id.get()),
        position: channel.position,
        topic: channel.topic.clone(),
        nsfw: channel.nsfw,
        bitrate: channel.bitrate,
        user_limit: channel.user_limit,
        slow_mode_seconds: channel.rate_limit_per_user.map(u16::from).unwrap_or(0),
        overrides,
    })
}

fn channel_kind_from(kind: ChannelType) -> Option<ChannelKind> {
    match kind {
        ChannelType::Text => Some(ChannelKind::Text),
        ChannelType::Voice => Some(ChannelKind::Voice),
        ChannelType::Category => Some(ChannelKind::Category),
        ChannelType::News => Some(ChannelKind::News),
        ChannelType::Stage => Some(ChannelKind::Stage),
        ChannelType::Forum => Some(ChannelKind::Forum),
        _ => None,
    }
}

fn channel_type_from(kind: ChannelKind) -> ChannelType {
    match kind {
        ChannelKind::Text => ChannelType::Text,
        ChannelKind::Voice => ChannelType::Voice,
        ChannelKind::Category => ChannelType::Category,
        ChannelKind::News => ChannelType::News,
        ChannelKind::Stage => ChannelType::Stage,
        ChannelKind::Forum => ChannelType::Forum,
    }
}
