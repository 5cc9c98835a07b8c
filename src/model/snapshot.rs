use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    ban::BanEntry, channel::ChannelTree, emoji::EmojiEntry, member::MemberEntry, role::RoleEntry,
};
use crate::util::string_id::{deserialize_u64_from_string, serialize_u64_as_string};

/// Everything captured from a guild in one extraction pass.
///
/// Sections skipped through `SnapshotOptions::skip` are left empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuildSnapshot {
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub guild_id: u64,
    pub name: String,
    pub icon_url: Option<String>,
    /// When the extraction finished.
    pub created_at: DateTime<Utc>,
    pub bans: Vec<BanEntry>,
    pub members: Vec<MemberEntry>,
    pub roles: Vec<RoleEntry>,
    pub emojis: Vec<EmojiEntry>,
    pub channels: ChannelTree,
}
