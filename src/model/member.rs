use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::string_id::{
    deserialize_u64_from_string, deserialize_u64_vec_from_strings, serialize_u64_as_string,
    serialize_u64_vec_as_strings,
};

/// A cached guild member at the time of the snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberEntry {
    /// Discord user ID.
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub user_id: u64,
    /// Discord username.
    pub username: String,
    /// Legacy four digit discriminator; `None` for accounts on unique usernames.
    pub discriminator: Option<String>,
    /// Avatar CDN URL if the user has set an avatar.
    pub avatar_url: Option<String>,
    /// When the member joined the guild.
    pub joined_at: Option<DateTime<Utc>>,
    /// Role IDs assigned to the member, in the platform's cache order.
    #[serde(
        serialize_with = "serialize_u64_vec_as_strings",
        deserialize_with = "deserialize_u64_vec_from_strings"
    )]
    pub role_ids: Vec<u64>,
    /// Whether the account is a bot.
    pub is_bot: bool,
}
