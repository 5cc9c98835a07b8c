//! Test factory for creating Serenity Message objects.

use serenity::all::Message;

/// Creates a test Serenity Message with one rich embed and one attachment.
///
/// # Arguments
/// - `message_id` - Discord message ID (snowflake)
/// - `channel_id` - Channel the message was sent in
/// - `username` - Author username
/// - `content` - Message text
/// - `timestamp` - RFC 3339 send time
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
pub fn create_test_message(
    message_id: u64,
    channel_id: u64,
    username: &str,
    content: &str,
    timestamp: &str,
) -> Message {
    serde_json::from_value(serde_json::json!({
        "id": message_id.to_string(),
        "channel_id": channel_id.to_string(),
        "author": {
            "id": "200000000000000000",
            "username": username,
            "discriminator": "0",
            "avatar": null,
        },
        "content": content,
        "timestamp": timestamp,
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "attachments": [{
            "id": "300000000000000000",
            "filename": "map.png",
            "size": 1024,
            "url": "https://cdn.discordapp.com/attachments/1/2/map.png",
            "proxy_url": "https://media.discordapp.net/attachments/1/2/map.png",
        }],
        "embeds": [{
            "type": "rich",
            "title": "Fleet up",
        }],
        "pinned": true,
        "type": 0,
    }))
    .expect("Failed to create test message - invalid JSON structure")
}
