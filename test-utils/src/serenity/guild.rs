//! Test factory for creating Serenity PartialGuild objects.

use serde_json::Value;
use serenity::all::PartialGuild;

/// Creates a test PartialGuild as returned by `GET /guilds/{guild.id}`.
///
/// Settings default to verification level 1, explicit content filter 0, default
/// notifications 1, an AFK timeout of 300 seconds and no AFK/system/rules channels.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `name` - Guild name
/// - `owner_id` - Owner user ID
/// - `roles` - Role JSON values, see `role::role_json`
///
/// # Panics
/// - If the JSON cannot be deserialized into a PartialGuild (indicates invalid test data)
pub fn create_test_partial_guild(
    guild_id: u64,
    name: &str,
    owner_id: u64,
    roles: Vec<Value>,
) -> PartialGuild {
    serde_json::from_value(serde_json::json!({
        "id": guild_id.to_string(),
        "name": name,
        "icon": null,
        "icon_hash": null,
        "splash": null,
        "discovery_splash": null,
        "banner": null,
        "description": null,
        "owner_id": owner_id.to_string(),
        "afk_channel_id": null,
        "afk_timeout": 300,
        "verification_level": 1,
        "default_message_notifications": 1,
        "explicit_content_filter": 0,
        "roles": roles,
        "emojis": [],
        "stickers": [],
        "features": [],
        "mfa_level": 0,
        "system_channel_id": null,
        "system_channel_flags": 0,
        "rules_channel_id": null,
        "public_updates_channel_id": null,
        "premium_tier": 1,
        "premium_subscription_count": 3,
        "premium_progress_bar_enabled": false,
        "preferred_locale": "en-US",
        "nsfw_level": 0,
        "vanity_url_code": null,
        "widget_enabled": false,
        "widget_channel_id": null,
        "application_id": null,
        "max_presences": null,
        "max_members": 100000,
    }))
    .expect("Failed to create test partial guild - invalid JSON structure")
}
