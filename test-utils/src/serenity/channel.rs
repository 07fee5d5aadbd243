//! Test factory for creating Serenity GuildChannel objects.

use serde_json::Value;
use serenity::all::GuildChannel;

/// Builds a permission overwrite JSON value.
///
/// # Arguments
/// - `target_id` - Role or user ID
/// - `is_member` - `true` for a member overwrite, `false` for a role overwrite
/// - `allow` / `deny` - Permission bit sets
pub fn overwrite_json(target_id: u64, is_member: bool, allow: u64, deny: u64) -> Value {
    serde_json::json!({
        "id": target_id.to_string(),
        "type": if is_member { 1 } else { 0 },
        "allow": allow.to_string(),
        "deny": deny.to_string(),
    })
}

/// Creates a test GuildChannel as returned by `GET /guilds/{guild.id}/channels`.
///
/// # Arguments
/// - `channel_id` - Channel ID
/// - `guild_id` - Owning guild ID
/// - `name` - Channel name
/// - `kind` - Discord channel type (0 text, 2 voice, 4 category, 5 news, 13 stage, 15 forum)
/// - `position` - Sorting position
/// - `parent_id` - Parent category ID
/// - `overwrites` - Permission overwrite JSON values, see `overwrite_json`
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
pub fn create_test_channel(
    channel_id: u64,
    guild_id: u64,
    name: &str,
    kind: u8,
    position: u16,
    parent_id: Option<u64>,
    overwrites: Vec<Value>,
) -> GuildChannel {
    let is_voice = kind == 2 || kind == 13;

    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": kind,
        "name": name,
        "position": position,
        "parent_id": parent_id.map(|id| id.to_string()),
        "topic": if kind == 0 { Some("Channel topic") } else { None },
        "nsfw": false,
        "rate_limit_per_user": if kind == 0 { Some(10) } else { None },
        "bitrate": if is_voice { Some(64000) } else { None },
        "user_limit": if is_voice { Some(10) } else { None },
        "permission_overwrites": overwrites,
        "flags": 0,
        "available_tags": [],
        "applied_tags": [],
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}
