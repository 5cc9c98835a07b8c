//! Test factory for creating Serenity GuildChannel objects.

use serenity::all::{GuildChannel, PermissionOverwrite};

/// Creates a test Serenity GuildChannel.
///
/// # Arguments
/// - `channel_id` - Discord channel ID (snowflake)
/// - `guild_id` - Owning guild ID
/// - `name` - Channel name
/// - `kind` - Raw Discord channel type (0 text, 2 voice, 4 category, 5 news, 11 public thread)
/// - `position` - Sorting position
/// - `parent_id` - Category for channels, parent channel for threads
/// - `overwrites` - Channel permission overwrites, serialized in Discord's wire shape
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
    overwrites: &[PermissionOverwrite],
) -> GuildChannel {
    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": kind,
        "name": name,
        "position": position,
        "parent_id": parent_id.map(|id| id.to_string()),
        "permission_overwrites": overwrites,
        "nsfw": false,
        "topic": null,
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}

/// Creates a test archived public thread under `parent_id`.
///
/// # Arguments
/// - `thread_id` - Discord channel ID of the thread
/// - `guild_id` - Owning guild ID
/// - `parent_id` - Channel the thread was started in
/// - `name` - Thread name
/// - `archive_timestamp` - RFC 3339 time the thread was archived
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
pub fn create_test_archived_thread(
    thread_id: u64,
    guild_id: u64,
    parent_id: u64,
    name: &str,
    archive_timestamp: &str,
) -> GuildChannel {
    serde_json::from_value(serde_json::json!({
        "id": thread_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": 11,
        "name": name,
        "parent_id": parent_id.to_string(),
        "rate_limit_per_user": 0,
        "thread_metadata": {
            "archived": true,
            "auto_archive_duration": 1440,
            "archive_timestamp": archive_timestamp,
            "locked": false,
        },
    }))
    .expect("Failed to create test thread - invalid JSON structure")
}
