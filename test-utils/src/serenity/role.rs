//! Test factory for creating Serenity Role objects.

use serde_json::Value;
use serenity::all::Role;

/// Builds the JSON Discord returns for a role.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `position` - Role position in the hierarchy (higher = more important)
/// - `permissions` - Permission bit set
/// - `managed` - Whether an integration manages the role
pub fn role_json(role_id: u64, name: &str, position: u16, permissions: u64, managed: bool) -> Value {
    serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": 0,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": permissions.to_string(),
        "managed": managed,
        "mentionable": false,
    })
}

/// Creates a test Serenity Role with customizable fields.
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// let role = create_test_role(123456789, "Admin", 10, 8);
/// assert_eq!(role.position, 10);
/// ```
pub fn create_test_role(role_id: u64, name: &str, position: u16, permissions: u64) -> Role {
    serde_json::from_value(role_json(role_id, name, position, permissions, false))
        .expect("Failed to create test role - invalid JSON structure")
}
