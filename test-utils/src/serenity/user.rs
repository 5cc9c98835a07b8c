//! Test factories for creating Serenity User, Member and Ban objects.

use serenity::all::{Ban, Member, User};

/// Creates a test Serenity User.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Account username
/// - `discriminator` - Legacy four digit tag, `None` for migrated accounts
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, username: &str, discriminator: Option<&str>) -> User {
    serde_json::from_value(serde_json::json!({
        "id": user_id.to_string(),
        "username": username,
        "discriminator": discriminator.unwrap_or("0"),
        "global_name": null,
        "avatar": null,
        "bot": false,
    }))
    .expect("Failed to create test user - invalid JSON structure")
}

/// Creates a test Serenity guild Member.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user` - The member's user, see `create_test_user`
/// - `role_ids` - Assigned roles in the order Discord lists them
/// - `joined_at` - RFC 3339 join time, `None` when Discord omits it
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(
    guild_id: u64,
    user: User,
    role_ids: &[u64],
    joined_at: Option<&str>,
) -> Member {
    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "user": user,
        "nick": null,
        "avatar": null,
        "roles": role_ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
        "joined_at": joined_at,
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}

/// Creates a test Serenity Ban entry.
///
/// # Panics
/// - If the JSON cannot be deserialized into a Ban (indicates invalid test data)
pub fn create_test_ban(user_id: u64, reason: Option<&str>) -> Ban {
    serde_json::from_value(serde_json::json!({
        "reason": reason,
        "user": create_test_user(user_id, &format!("banned-{}", user_id), None),
    }))
    .expect("Failed to create test ban - invalid JSON structure")
}
