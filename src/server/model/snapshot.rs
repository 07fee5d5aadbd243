//! Snapshot domain models.
//!
//! A snapshot is an immutable capture of a guild's configuration. Its payload is a
//! tagged union keyed by the snapshot kind: every variant carries the `guild` header
//! plus exactly the sections that kind captures. The payload is stored as JSON text
//! and decoded at the data layer boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    model::backup::{KindCountDto, SnapshotDto, SnapshotListDto, SnapshotStatsDto},
    server::{
        error::{backup::BackupError, internal::InternalError, AppError},
        util::parse::parse_u64_from_string,
    },
};

/// Maximum number of snapshots a single user may hold per guild.
pub const MAX_SNAPSHOTS_PER_OWNER: u64 = 10;

/// Which sections of a guild a snapshot captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotKind {
    /// Roles, channels, emojis and settings.
    Full,
    /// Settings only.
    Settings,
    /// Roles only.
    Roles,
    /// Channels only.
    Channels,
    /// Roles and settings.
    Custom,
}

impl SnapshotKind {
    pub const ALL: [SnapshotKind; 5] = [
        SnapshotKind::Full,
        SnapshotKind::Settings,
        SnapshotKind::Roles,
        SnapshotKind::Channels,
        SnapshotKind::Custom,
    ];

    /// Value stored in the database and used in command choices.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Settings => "settings",
            Self::Roles => "roles",
            Self::Channels => "channels",
            Self::Custom => "custom",
        }
    }

    /// Display label used in embeds.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Full => "Full Server",
            Self::Settings => "Settings Only",
            Self::Roles => "Roles Only",
            Self::Channels => "Channels Only",
            Self::Custom => "Custom (Roles + Settings)",
        }
    }

    pub fn captures_roles(&self) -> bool {
        matches!(self, Self::Full | Self::Roles | Self::Custom)
    }

    pub fn captures_channels(&self) -> bool {
        matches!(self, Self::Full | Self::Channels)
    }

    pub fn captures_emojis(&self) -> bool {
        matches!(self, Self::Full)
    }

    pub fn captures_settings(&self) -> bool {
        matches!(self, Self::Full | Self::Settings | Self::Custom)
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnapshotKind {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| InternalError::UnknownColumnValue {
                column: "kind",
                value: value.to_string(),
            })
    }
}

/// Guild-level header captured for every snapshot kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildSection {
    pub name: String,
    pub description: Option<String>,
    pub icon_ref: Option<String>,
    pub banner_ref: Option<String>,
    pub verification_level: u8,
    pub explicit_content_filter: u8,
    pub default_notifications: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSection {
    pub name: String,
    pub color: u32,
    pub hoisted: bool,
    pub mentionable: bool,
    pub permission_set: u64,
    pub position: u16,
}

/// Channel types a snapshot can record and recreate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Text,
    Voice,
    Category,
    News,
    Stage,
    Forum,
}

impl ChannelKind {
    /// Voice-type channels carry bitrate and user limit.
    pub fn is_voice(&self) -> bool {
        matches!(self, Self::Voice | Self::Stage)
    }
}

/// Target of a channel permission override.
///
/// Role targets are stored by name so the override can be re-bound to a role
/// recreated in a different guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverrideTarget {
    Role {
        name: String,
    },
    Member {
        #[serde(rename = "userId")]
        user_id: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionOverrideSection {
    pub target: OverrideTarget,
    pub allow: u64,
    pub deny: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSection {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    pub parent_name: Option<String>,
    pub position: u16,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub bitrate: Option<u32>,
    pub user_limit: Option<u32>,
    pub slow_mode_seconds: u16,
    #[serde(default)]
    pub permission_overrides: Vec<PermissionOverrideSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiSection {
    pub name: String,
    pub image_ref: String,
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSection {
    pub system_channel_name: Option<String>,
    pub rules_channel_name: Option<String>,
    pub public_updates_channel_name: Option<String>,
    pub afk_channel_name: Option<String>,
    pub afk_timeout_seconds: u32,
    pub boost_tier: u8,
    pub boost_count: u64,
}

/// Captured guild configuration, one variant per snapshot kind.
///
/// The `guild` header travels with the settings section: only kinds that capture
/// settings restore guild-level values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SnapshotPayload {
    Full {
        guild: GuildSection,
        roles: Vec<RoleSection>,
        channels: Vec<ChannelSection>,
        emojis: Vec<EmojiSection>,
        settings: SettingsSection,
    },
    Settings {
        guild: GuildSection,
        settings: SettingsSection,
    },
    Roles {
        roles: Vec<RoleSection>,
    },
    Channels {
        channels: Vec<ChannelSection>,
    },
    Custom {
        guild: GuildSection,
        roles: Vec<RoleSection>,
        settings: SettingsSection,
    },
}

impl SnapshotPayload {
    pub fn kind(&self) -> SnapshotKind {
        match self {
            Self::Full { .. } => SnapshotKind::Full,
            Self::Settings { .. } => SnapshotKind::Settings,
            Self::Roles { .. } => SnapshotKind::Roles,
            Self::Channels { .. } => SnapshotKind::Channels,
            Self::Custom { .. } => SnapshotKind::Custom,
        }
    }

    /// Guild-level values, absent for kinds that don't capture settings.
    pub fn guild(&self) -> Option<&GuildSection> {
        match self {
            Self::Full { guild, .. }
            | Self::Settings { guild, .. }
            | Self::Custom { guild, .. } => Some(guild),
            Self::Roles { .. } | Self::Channels { .. } => None,
        }
    }

    /// Captured roles, empty for kinds that don't capture roles.
    pub fn roles(&self) -> &[RoleSection] {
        match self {
            Self::Full { roles, .. } | Self::Roles { roles, .. } | Self::Custom { roles, .. } => {
                roles
            }
            Self::Settings { .. } | Self::Channels { .. } => &[],
        }
    }

    /// Captured channels, empty for kinds that don't capture channels.
    pub fn channels(&self) -> &[ChannelSection] {
        match self {
            Self::Full { channels, .. } | Self::Channels { channels, .. } => channels,
            Self::Settings { .. } | Self::Roles { .. } | Self::Custom { .. } => &[],
        }
    }

    pub fn emojis(&self) -> &[EmojiSection] {
        match self {
            Self::Full { emojis, .. } => emojis,
            _ => &[],
        }
    }

    pub fn settings(&self) -> Option<&SettingsSection> {
        match self {
            Self::Full { settings, .. }
            | Self::Settings { settings, .. }
            | Self::Custom { settings, .. } => Some(settings),
            Self::Roles { .. } | Self::Channels { .. } => None,
        }
    }

    /// Serializes the payload to the compact JSON stored in the database.
    ///
    /// The byte length of this string is the snapshot's recorded size.
    pub fn encode(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a stored payload and checks it against the snapshot's recorded kind.
    ///
    /// # Returns
    /// - `Ok(SnapshotPayload)` - Well-formed payload of the expected kind
    /// - `Err(BackupError::InvalidSnapshot)` - Malformed JSON, kind mismatch, or
    ///   unnamed roles/channels
    pub fn decode(raw: &str, expected: SnapshotKind) -> Result<Self, BackupError> {
        let payload: SnapshotPayload = serde_json::from_str(raw)
            .map_err(|e| BackupError::InvalidSnapshot(format!("unreadable payload: {}", e)))?;

        if payload.kind() != expected {
            return Err(BackupError::InvalidSnapshot(format!(
                "payload holds a `{}` backup but the record says `{}`",
                payload.kind(),
                expected
            )));
        }

        payload.validate()?;

        Ok(payload)
    }

    /// Checks invariants the restore engine relies on.
    pub fn validate(&self) -> Result<(), BackupError> {
        if self.roles().iter().any(|role| role.name.trim().is_empty()) {
            return Err(BackupError::InvalidSnapshot(
                "a role has an empty name".to_string(),
            ));
        }

        if self
            .channels()
            .iter()
            .any(|channel| channel.name.trim().is_empty())
        {
            return Err(BackupError::InvalidSnapshot(
                "a channel has an empty name".to_string(),
            ));
        }

        Ok(())
    }
}

/// A persisted snapshot with its decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub id: String,
    pub guild_id: u64,
    pub guild_name: String,
    pub owner_user_id: u64,
    pub kind: SnapshotKind,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub payload: SnapshotPayload,
    pub size_bytes: u64,
}

impl Snapshot {
    /// Converts an entity model to a snapshot.
    ///
    /// This conversion happens at the data layer boundary to ensure entity models
    /// never leak into service or controller layers.
    ///
    /// # Returns
    /// - `Ok(Snapshot)` - Decoded snapshot
    /// - `Err(AppError::InternalErr)` - Stored IDs or kind are unreadable
    /// - `Err(AppError::BackupErr(InvalidSnapshot))` - Stored payload is malformed
    pub fn from_entity(entity: entity::guild_snapshot::Model) -> Result<Self, AppError> {
        let kind: SnapshotKind = entity.kind.parse()?;
        let payload = SnapshotPayload::decode(&entity.payload, kind)?;

        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            guild_name: entity.guild_name,
            owner_user_id: parse_u64_from_string(entity.owner_user_id)?,
            kind,
            description: entity.description,
            created_at: entity.created_at,
            payload,
            size_bytes: entity.size_bytes.max(0) as u64,
        })
    }
}

impl Snapshot {
    /// Converts the snapshot to its API representation.
    pub fn into_dto(self) -> SnapshotDto {
        SnapshotDto {
            role_count: self.payload.roles().len(),
            channel_count: self.payload.channels().len(),
            emoji_count: self.payload.emojis().len(),
            id: self.id,
            guild_id: self.guild_id,
            guild_name: self.guild_name,
            kind: self.kind.as_str().to_string(),
            description: self.description,
            created_at: self.created_at.timestamp_millis(),
            size_bytes: self.size_bytes,
        }
    }
}

/// Aggregate figures over an owner's snapshots in a guild.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotStats {
    pub count: u64,
    pub total_size_bytes: u64,
    /// Counts per kind, only kinds with at least one snapshot.
    pub by_kind: Vec<(SnapshotKind, u64)>,
    pub remaining_quota: u64,
}

impl SnapshotStats {
    pub fn from_snapshots(snapshots: &[Snapshot]) -> Self {
        let count = snapshots.len() as u64;
        let by_kind = SnapshotKind::ALL
            .into_iter()
            .map(|kind| {
                let n = snapshots.iter().filter(|s| s.kind == kind).count() as u64;
                (kind, n)
            })
            .filter(|(_, n)| *n > 0)
            .collect();

        Self {
            count,
            total_size_bytes: snapshots.iter().map(|s| s.size_bytes).sum(),
            by_kind,
            remaining_quota: MAX_SNAPSHOTS_PER_OWNER.saturating_sub(count),
        }
    }

    pub fn into_dto(self) -> SnapshotStatsDto {
        SnapshotStatsDto {
            count: self.count,
            total_size_bytes: self.total_size_bytes,
            by_kind: self
                .by_kind
                .into_iter()
                .map(|(kind, count)| KindCountDto {
                    kind: kind.as_str().to_string(),
                    count,
                })
                .collect(),
            remaining_quota: self.remaining_quota,
        }
    }
}

/// An owner's snapshots in a guild, newest first, with statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotList {
    pub snapshots: Vec<Snapshot>,
    pub stats: SnapshotStats,
}

impl SnapshotList {
    pub fn into_dto(self) -> SnapshotListDto {
        SnapshotListDto {
            snapshots: self.snapshots.into_iter().map(Snapshot::into_dto).collect(),
            stats: self.stats.into_dto(),
        }
    }
}

/// Parameters for persisting a new snapshot.
#[derive(Debug, Clone)]
pub struct CreateSnapshotParam {
    pub guild_id: u64,
    pub guild_name: String,
    pub owner_user_id: u64,
    pub description: Option<String>,
    pub payload: SnapshotPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guild_section() -> GuildSection {
        GuildSection {
            name: "Test Guild".to_string(),
            description: None,
            icon_ref: None,
            banner_ref: None,
            verification_level: 1,
            explicit_content_filter: 0,
            default_notifications: 1,
        }
    }

    fn role(name: &str) -> RoleSection {
        RoleSection {
            name: name.to_string(),
            color: 0xFF0000,
            hoisted: true,
            mentionable: false,
            permission_set: 8,
            position: 3,
        }
    }

    /// Tests that the payload JSON is tagged with its kind.
    ///
    /// Expected: `"kind":"roles"` present and no settings section
    #[test]
    fn encodes_kind_tag() {
        let payload = SnapshotPayload::Roles {
            roles: vec![role("Moderator")],
        };

        let json = payload.encode().unwrap();

        assert!(json.contains(r#""kind":"roles""#));
        assert!(json.contains(r#""permissionSet":8"#));
        assert!(!json.contains("settings"));
        assert!(!json.contains("guild"));
        assert!(payload.guild().is_none());
    }

    /// Tests that decoding rejects a payload whose tag disagrees with the record.
    ///
    /// Expected: Err(InvalidSnapshot)
    #[test]
    fn rejects_kind_mismatch() {
        let raw = SnapshotPayload::Roles { roles: vec![] }
        .encode()
        .unwrap();

        let result = SnapshotPayload::decode(&raw, SnapshotKind::Full);

        assert!(matches!(result, Err(BackupError::InvalidSnapshot(_))));
    }

    /// Tests that a payload missing a mandatory section is rejected.
    ///
    /// Expected: Err(InvalidSnapshot) for a `custom` payload without settings
    #[test]
    fn rejects_missing_mandatory_section() {
        let raw = r#"{"kind":"custom","guild":{"name":"G","description":null,"iconRef":null,"bannerRef":null,"verificationLevel":0,"explicitContentFilter":0,"defaultNotifications":0},"roles":[]}"#;

        let result = SnapshotPayload::decode(raw, SnapshotKind::Custom);

        assert!(matches!(result, Err(BackupError::InvalidSnapshot(_))));
    }

    /// Tests that unnamed roles fail validation.
    ///
    /// Expected: Err(InvalidSnapshot)
    #[test]
    fn rejects_unnamed_role() {
        let payload = SnapshotPayload::Roles {
            roles: vec![role("  ")],
        };

        assert!(payload.validate().is_err());
    }

    /// Tests section accessors for a kind without channels.
    ///
    /// Expected: empty channel and emoji slices, settings present
    #[test]
    fn custom_payload_exposes_roles_and_settings_only() {
        let payload = SnapshotPayload::Custom {
            guild: guild_section(),
            roles: vec![role("Admin")],
            settings: SettingsSection {
                system_channel_name: None,
                rules_channel_name: None,
                public_updates_channel_name: None,
                afk_channel_name: None,
                afk_timeout_seconds: 300,
                boost_tier: 0,
                boost_count: 0,
            },
        };

        assert_eq!(payload.kind(), SnapshotKind::Custom);
        assert_eq!(payload.roles().len(), 1);
        assert!(payload.channels().is_empty());
        assert!(payload.emojis().is_empty());
        assert!(payload.settings().is_some());
        assert_eq!(payload.guild(), Some(&guild_section()));
    }

    /// Tests the kind-to-section policy.
    ///
    /// Expected: custom captures roles and settings but not channels or emojis
    #[test]
    fn kind_section_policy() {
        assert!(SnapshotKind::Custom.captures_roles());
        assert!(SnapshotKind::Custom.captures_settings());
        assert!(!SnapshotKind::Custom.captures_channels());
        assert!(!SnapshotKind::Custom.captures_emojis());
        assert!(SnapshotKind::Full.captures_emojis());
        assert!(!SnapshotKind::Settings.captures_roles());
    }

    /// Tests parsing stored kind values.
    ///
    /// Expected: known values parse, unknown values are internal errors
    #[test]
    fn parses_kind() {
        assert_eq!("channels".parse::<SnapshotKind>().unwrap(), SnapshotKind::Channels);
        assert!("everything".parse::<SnapshotKind>().is_err());
    }
}
