//! Test factory for creating Serenity Role objects.

use serenity::all::Role;

/// Creates a test Serenity Role with customizable fields.
///
/// All other fields are set to reasonable defaults (not hoisted, not managed,
/// not mentionable, with zero permissions).
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `color` - Role color as a 32-bit integer (RGB)
/// - `position` - Role position in the hierarchy (higher = more important)
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
pub fn create_test_role(role_id: u64, name: &str, color: u32, position: u16) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": color,
        "colors": {
            "primary_color": color,
            "secondary_color": null,
            "tertiary_color": null,
        },
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": "0",
        "managed": false,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}
