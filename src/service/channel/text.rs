//! Text channel capture: settings, recent message history and threads.

use tracing::trace;

use crate::{
    config::SnapshotOptions,
    error::SnapshotError,
    model::{
        channel::{TextChannelEntry, ThreadEntry},
        message::{AttachmentEntry, MessageEntry},
    },
    service::channel::permission::capture_overwrites,
    source::{ChannelKind, GuildSource, SourceChannel, SourceMessage},
    util::timeout::with_timeout,
};

/// Largest page the platform returns for a single message request.
const MAX_MESSAGES_PER_REQUEST: u8 = 100;

/// Auto-archive duration assumed when the platform omits thread metadata.
const DEFAULT_AUTO_ARCHIVE_MINUTES: u16 = 1440;

pub struct TextChannelCapture<'a> {
    source: &'a dyn GuildSource,
    options: &'a SnapshotOptions,
}

impl<'a> TextChannelCapture<'a> {
    pub fn new(source: &'a dyn GuildSource, options: &'a SnapshotOptions) -> Self {
        Self { source, options }
    }

    pub async fn capture(
        &self,
        channel: &SourceChannel,
    ) -> Result<TextChannelEntry, SnapshotError> {
        let messages = self.capture_messages(channel).await?;
        let threads = self.capture_threads(channel).await?;

        Ok(TextChannelEntry {
            name: channel.name.clone(),
            is_news: channel.kind == ChannelKind::News,
            nsfw: channel.nsfw,
            topic: channel.topic.clone(),
            rate_limit_per_user: channel.rate_limit_per_user,
            permission_overwrites: capture_overwrites(&channel.overwrites),
            messages,
            threads,
        })
    }

    /// Fetches the most recent messages and returns them oldest first.
    async fn capture_messages(
        &self,
        channel: &SourceChannel,
    ) -> Result<Vec<MessageEntry>, SnapshotError> {
        let limit = self
            .options
            .max_messages_per_channel
            .min(MAX_MESSAGES_PER_REQUEST);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut messages = with_timeout(
            self.options.request_timeout,
            format!("fetching messages of #{} ({})", channel.name, channel.id),
            self.source.messages(channel.id, limit),
        )
        .await?;
        messages.reverse();

        trace!("Captured {} messages from #{}", messages.len(), channel.name);

        Ok(messages.into_iter().map(into_message_entry).collect())
    }

    async fn capture_threads(
        &self,
        channel: &SourceChannel,
    ) -> Result<Vec<ThreadEntry>, SnapshotError> {
        let threads = with_timeout(
            self.options.request_timeout,
            format!("fetching threads of #{} ({})", channel.name, channel.id),
            self.source.threads(channel.id),
        )
        .await?;

        let mut entries = Vec::with_capacity(threads.len());
        for thread in &threads {
            let Some(kind) = thread.kind.thread_kind() else {
                trace!("Ignoring non-thread {} listed under #{}", thread.id, channel.name);
                continue;
            };

            let metadata = thread.thread;
            entries.push(ThreadEntry {
                name: thread.name.clone(),
                kind,
                archived: metadata.map(|m| m.archived).unwrap_or(false),
                locked: metadata.map(|m| m.locked).unwrap_or(false),
                auto_archive_duration: metadata
                    .map(|m| m.auto_archive_duration)
                    .unwrap_or(DEFAULT_AUTO_ARCHIVE_MINUTES),
                rate_limit_per_user: thread.rate_limit_per_user,
                messages: self.capture_messages(thread).await?,
            });
        }

        Ok(entries)
    }
}

fn into_message_entry(message: SourceMessage) -> MessageEntry {
    MessageEntry {
        username: message.author_name,
        avatar_url: message.author_avatar_url,
        content: message.content,
        embeds: message.embeds,
        attachments: message
            .attachments
            .into_iter()
            .map(|attachment| AttachmentEntry {
                name: attachment.filename,
                url: attachment.url,
            })
            .collect(),
        pinned: message.pinned,
        sent_at: message.sent_at,
    }
}
