//! Snapshot payload JSON fixtures.
//!
//! Payloads are stored as JSON text, so these fixtures build the exact documents the
//! application writes: internally tagged by `kind`, camelCase fields.

use serde_json::{json, Value};

/// Default guild name written into payload headers.
pub const DEFAULT_GUILD_NAME: &str = "Test Guild";

/// Guild header section carried by payloads that capture settings.
pub fn guild_section(name: &str) -> Value {
    json!({
        "name": name,
        "description": null,
        "iconRef": null,
        "bannerRef": null,
        "verificationLevel": 1,
        "explicitContentFilter": 0,
        "defaultNotifications": 1,
    })
}

/// A role entry with no special permissions.
pub fn role_section(name: &str, position: u16) -> Value {
    json!({
        "name": name,
        "color": 0,
        "hoisted": false,
        "mentionable": false,
        "permissionSet": 0,
        "position": position,
    })
}

/// A text channel entry without parent or overrides.
pub fn text_channel_section(name: &str, position: u16) -> Value {
    json!({
        "name": name,
        "type": "text",
        "parentName": null,
        "position": position,
        "topic": null,
        "nsfw": false,
        "bitrate": null,
        "userLimit": null,
        "slowModeSeconds": 0,
        "permissionOverrides": [],
    })
}

/// Settings section with nothing configured.
pub fn settings_section() -> Value {
    json!({
        "systemChannelName": null,
        "rulesChannelName": null,
        "publicUpdatesChannelName": null,
        "afkChannelName": null,
        "afkTimeoutSeconds": 300,
        "boostTier": 0,
        "boostCount": 0,
    })
}

/// A `roles` payload holding the given role names, highest position first.
///
/// # Example
///
/// ```rust,ignore
/// let raw = fixture::payload::roles_payload(&["Admin", "Member"]).to_string();
/// ```
pub fn roles_payload(role_names: &[&str]) -> Value {
    let count = role_names.len() as u16;
    let roles: Vec<Value> = role_names
        .iter()
        .enumerate()
        .map(|(i, name)| role_section(name, count - i as u16))
        .collect();

    json!({
        "kind": "roles",
        "roles": roles,
    })
}

/// A `full` payload with the given roles and text channels.
pub fn full_payload(guild_name: &str, role_names: &[&str], channel_names: &[&str]) -> Value {
    let count = role_names.len() as u16;
    let roles: Vec<Value> = role_names
        .iter()
        .enumerate()
        .map(|(i, name)| role_section(name, count - i as u16))
        .collect();
    let channels: Vec<Value> = channel_names
        .iter()
        .enumerate()
        .map(|(i, name)| text_channel_section(name, i as u16))
        .collect();

    json!({
        "kind": "full",
        "guild": guild_section(guild_name),
        "roles": roles,
        "channels": channels,
        "emojis": [],
        "settings": settings_section(),
    })
}
