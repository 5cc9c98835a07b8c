//! Immutable value snapshots copied out of the chat client at the source boundary.
//!
//! Extractors only ever see these types, never live client library objects, so the
//! platform's caches can keep changing underneath without affecting a snapshot in
//! progress.

use chrono::{DateTime, Utc};

use crate::model::channel::{OverwriteSubject, ThreadKind};

/// Identity of the guild being captured.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildInfo {
    /// Discord guild ID as a u64.
    pub id: u64,
    pub name: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceBan {
    pub user_id: u64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceMember {
    pub user_id: u64,
    pub username: String,
    pub discriminator: Option<u16>,
    pub avatar_url: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    pub role_ids: Vec<u64>,
    pub bot: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceRole {
    /// Discord role ID as a u64.
    pub id: u64,
    pub name: String,
    /// RGB color as a 24-bit integer, 0 for no color.
    pub color: u32,
    pub hoist: bool,
    /// Owned by an integration; cannot be recreated by guild admins.
    pub managed: bool,
    pub mentionable: bool,
    pub permissions: u64,
    pub position: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceEmoji {
    pub id: u64,
    pub name: String,
    /// CDN URL of the emoji image.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceOverwrite {
    pub subject_id: u64,
    pub subject: OverwriteSubject,
    pub allow: u64,
    pub deny: u64,
}

/// A guild channel, category or thread.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceChannel {
    /// Discord channel ID as a u64.
    pub id: u64,
    pub name: String,
    pub kind: ChannelKind,
    /// Position in the guild's channel list (for display ordering).
    pub position: u16,
    /// Category for channels, parent text channel for threads.
    pub parent_id: Option<u64>,
    pub overwrites: Vec<SourceOverwrite>,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub rate_limit_per_user: u16,
    pub bitrate: Option<u32>,
    pub user_limit: Option<u32>,
    /// Only present on threads.
    pub thread: Option<SourceThreadMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceThreadMetadata {
    pub archived: bool,
    pub locked: bool,
    /// Minutes of inactivity before auto-archive.
    pub auto_archive_duration: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceMessage {
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub content: String,
    pub embeds: Vec<serde_json::Value>,
    pub attachments: Vec<SourceAttachment>,
    pub pinned: bool,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceAttachment {
    pub filename: String,
    pub url: String,
}

/// Closed set of channel kinds the extractor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Text,
    News,
    Voice,
    Stage,
    Category,
    Forum,
    NewsThread,
    PublicThread,
    PrivateThread,
    /// Any kind the client library knows that has no dedicated variant here,
    /// carrying the raw platform type number.
    Other(u8),
}

/// Which mapper a channel goes through when placed in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRoute {
    Text,
    Voice,
    /// Never a standalone tree node.
    Excluded,
}

impl ChannelKind {
    /// Dispatch target for tree placement.
    ///
    /// Categories are containers and threads belong to their parent text
    /// channel, so both are excluded. Every remaining non-text kind is captured
    /// through the voice mapper.
    pub fn route(self) -> ChannelRoute {
        match self {
            Self::Text | Self::News => ChannelRoute::Text,
            Self::Category | Self::NewsThread | Self::PublicThread | Self::PrivateThread => {
                ChannelRoute::Excluded
            }
            Self::Voice | Self::Stage | Self::Forum | Self::Other(_) => ChannelRoute::Voice,
        }
    }

    pub fn thread_kind(self) -> Option<ThreadKind> {
        match self {
            Self::NewsThread => Some(ThreadKind::News),
            Self::PublicThread => Some(ThreadKind::Public),
            Self::PrivateThread => Some(ThreadKind::Private),
            _ => None,
        }
    }
}
