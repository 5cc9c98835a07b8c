//! Channel tree records.
//!
//! The tree is two levels deep, mirroring the platform's own structure: categories
//! hold children, everything without a category lands in `others`. Threads are not
//! tree nodes; they hang off the text channel they belong to.

use serde::{Deserialize, Serialize};

use crate::model::message::MessageEntry;
use crate::util::string_id::{deserialize_u64_from_string, serialize_u64_as_string};

/// Ordered channel hierarchy of a guild.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTree {
    /// Categories in ascending position order.
    pub categories: Vec<CategoryEntry>,
    /// Top level channels outside any category, in ascending position order.
    pub others: Vec<ChannelEntry>,
}

impl ChannelTree {
    /// Iterates every channel entry in the tree, category children first.
    pub fn iter_channels(&self) -> impl Iterator<Item = &ChannelEntry> {
        self.categories
            .iter()
            .flat_map(|category| category.children.iter())
            .chain(self.others.iter())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub name: String,
    pub permission_overwrites: Vec<PermissionOverwriteEntry>,
    /// Child channels in ascending position order.
    pub children: Vec<ChannelEntry>,
}

/// A text-like or voice-like channel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChannelEntry {
    Text(TextChannelEntry),
    Voice(VoiceChannelEntry),
}

impl ChannelEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Text(text) => &text.name,
            Self::Voice(voice) => &voice.name,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextChannelEntry {
    pub name: String,
    /// Announcement channel rather than a standard text channel.
    pub is_news: bool,
    pub nsfw: bool,
    pub topic: Option<String>,
    /// Slowmode in seconds, 0 when disabled.
    pub rate_limit_per_user: u16,
    pub permission_overwrites: Vec<PermissionOverwriteEntry>,
    /// Most recent messages, oldest first.
    pub messages: Vec<MessageEntry>,
    pub threads: Vec<ThreadEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceChannelEntry {
    pub name: String,
    /// Bitrate in bits per second.
    pub bitrate: Option<u32>,
    /// Maximum connected users, 0 or `None` for unlimited.
    pub user_limit: Option<u32>,
    pub permission_overwrites: Vec<PermissionOverwriteEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadEntry {
    pub name: String,
    pub kind: ThreadKind,
    pub archived: bool,
    pub locked: bool,
    /// Minutes of inactivity before the thread auto-archives.
    pub auto_archive_duration: u16,
    pub rate_limit_per_user: u16,
    pub messages: Vec<MessageEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThreadKind {
    News,
    Public,
    Private,
}

/// A per-subject permission exception on a channel or category.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PermissionOverwriteEntry {
    /// Role or user ID the overwrite applies to.
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub subject_id: u64,
    pub subject_type: OverwriteSubject,
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub allow: u64,
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub deny: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverwriteSubject {
    Role,
    Member,
}
