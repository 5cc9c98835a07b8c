//! The guild handle consumed by the extractors.
//!
//! `GuildSource` is a read-only capability over the external chat client. Cached
//! collections are returned as owned value snapshots; anything requiring a network
//! round trip is async and fallible. `discord` provides the serenity-backed
//! implementation used by the bot.

pub mod discord;
pub mod model;

#[cfg(test)]
pub mod fake;

use serenity::async_trait;

use crate::error::SnapshotError;

pub use discord::SerenityGuildSource;
pub use model::{
    ChannelKind, ChannelRoute, GuildInfo, SourceAttachment, SourceBan, SourceChannel,
    SourceEmoji, SourceMember, SourceMessage, SourceOverwrite, SourceRole, SourceThreadMetadata,
};

#[async_trait]
pub trait GuildSource: Send + Sync {
    /// Identity of the guild.
    fn guild(&self) -> GuildInfo;

    /// Full ban list, paged through by the implementation.
    async fn bans(&self) -> Result<Vec<SourceBan>, SnapshotError>;

    /// Currently cached members only; no fetch-all is forced.
    fn members(&self) -> Vec<SourceMember>;

    fn roles(&self) -> Vec<SourceRole>;

    fn emojis(&self) -> Vec<SourceEmoji>;

    /// Cached channels and categories. Threads may or may not be included.
    fn channels(&self) -> Vec<SourceChannel>;

    /// Up to `limit` most recent messages of a channel or thread, newest first.
    async fn messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<SourceMessage>, SnapshotError>;

    /// Active and archived public threads whose parent is `channel_id`.
    async fn threads(&self, channel_id: u64) -> Result<Vec<SourceChannel>, SnapshotError>;

    /// Downloads an image asset such as an emoji.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SnapshotError>;
}
