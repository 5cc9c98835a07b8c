//! In-memory guild handle for tests.
//!
//! Holds plain source values and serves them without any network access. Channels
//! listed in `denied_channels` fail message fetches with `PermissionDenied`, and
//! `image_delays` lets tests make emoji downloads finish out of order.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serenity::async_trait;

use crate::error::SnapshotError;
use crate::model::channel::OverwriteSubject;
use crate::source::{
    ChannelKind, GuildInfo, GuildSource, SourceBan, SourceChannel, SourceEmoji, SourceMember,
    SourceMessage, SourceOverwrite, SourceRole, SourceThreadMetadata,
};

pub struct FakeGuildSource {
    pub info: GuildInfo,
    pub bans: Vec<SourceBan>,
    pub members: Vec<SourceMember>,
    pub roles: Vec<SourceRole>,
    pub emojis: Vec<SourceEmoji>,
    pub channels: Vec<SourceChannel>,
    /// Messages per channel, newest first as the platform returns them.
    pub messages: HashMap<u64, Vec<SourceMessage>>,
    pub threads: HashMap<u64, Vec<SourceChannel>>,
    pub images: HashMap<String, Vec<u8>>,
    pub image_delays: HashMap<String, Duration>,
    pub denied_channels: Vec<u64>,
    pub bans_denied: bool,
    pub bans_delay: Option<Duration>,
    /// Every `(channel_id, limit)` passed to `messages`.
    pub message_requests: Mutex<Vec<(u64, u8)>>,
}

impl FakeGuildSource {
    pub fn new(guild_id: u64) -> Self {
        Self {
            info: GuildInfo {
                id: guild_id,
                name: "Test Guild".to_string(),
                icon_url: None,
            },
            bans: Vec::new(),
            members: Vec::new(),
            roles: Vec::new(),
            emojis: Vec::new(),
            channels: Vec::new(),
            messages: HashMap::new(),
            threads: HashMap::new(),
            images: HashMap::new(),
            image_delays: HashMap::new(),
            denied_channels: Vec::new(),
            bans_denied: false,
            bans_delay: None,
            message_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_messages(&self) -> Vec<(u64, u8)> {
        self.message_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GuildSource for FakeGuildSource {
    fn guild(&self) -> GuildInfo {
        self.info.clone()
    }

    async fn bans(&self) -> Result<Vec<SourceBan>, SnapshotError> {
        if let Some(delay) = self.bans_delay {
            tokio::time::sleep(delay).await;
        }
        if self.bans_denied {
            return Err(SnapshotError::PermissionDenied(
                "missing BAN_MEMBERS".to_string(),
            ));
        }
        Ok(self.bans.clone())
    }

    fn members(&self) -> Vec<SourceMember> {
        self.members.clone()
    }

    fn roles(&self) -> Vec<SourceRole> {
        self.roles.clone()
    }

    fn emojis(&self) -> Vec<SourceEmoji> {
        self.emojis.clone()
    }

    fn channels(&self) -> Vec<SourceChannel> {
        self.channels.clone()
    }

    async fn messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<SourceMessage>, SnapshotError> {
        if let Ok(mut requests) = self.message_requests.lock() {
            requests.push((channel_id, limit));
        }
        if self.denied_channels.contains(&channel_id) {
            return Err(SnapshotError::PermissionDenied(format!(
                "missing READ_MESSAGE_HISTORY in {}",
                channel_id
            )));
        }
        Ok(self
            .messages
            .get(&channel_id)
            .map(|messages| messages.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn threads(&self, channel_id: u64) -> Result<Vec<SourceChannel>, SnapshotError> {
        Ok(self.threads.get(&channel_id).cloned().unwrap_or_default())
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SnapshotError> {
        if let Some(delay) = self.image_delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.images
            .get(url)
            .cloned()
            .ok_or_else(|| SnapshotError::NotFound(url.to_string()))
    }
}

pub fn channel(id: u64, name: &str, kind: ChannelKind, position: u16) -> SourceChannel {
    SourceChannel {
        id,
        name: name.to_string(),
        kind,
        position,
        parent_id: None,
        overwrites: Vec::new(),
        topic: None,
        nsfw: false,
        rate_limit_per_user: 0,
        bitrate: None,
        user_limit: None,
        thread: None,
    }
}

pub fn category(id: u64, name: &str, position: u16) -> SourceChannel {
    channel(id, name, ChannelKind::Category, position)
}

pub fn text_channel(id: u64, name: &str, position: u16, parent_id: Option<u64>) -> SourceChannel {
    SourceChannel {
        parent_id,
        ..channel(id, name, ChannelKind::Text, position)
    }
}

pub fn voice_channel(id: u64, name: &str, position: u16, parent_id: Option<u64>) -> SourceChannel {
    SourceChannel {
        parent_id,
        bitrate: Some(64000),
        user_limit: Some(0),
        ..channel(id, name, ChannelKind::Voice, position)
    }
}

pub fn thread(id: u64, name: &str, kind: ChannelKind, parent_id: u64) -> SourceChannel {
    SourceChannel {
        parent_id: Some(parent_id),
        thread: Some(SourceThreadMetadata {
            archived: false,
            locked: false,
            auto_archive_duration: 1440,
        }),
        ..channel(id, name, kind, 0)
    }
}

pub fn role_overwrite(role_id: u64, allow: u64, deny: u64) -> SourceOverwrite {
    SourceOverwrite {
        subject_id: role_id,
        subject: OverwriteSubject::Role,
        allow,
        deny,
    }
}

pub fn role(id: u64, name: &str, position: u16, managed: bool) -> SourceRole {
    SourceRole {
        id,
        name: name.to_string(),
        color: 0,
        hoist: false,
        managed,
        mentionable: false,
        permissions: 0,
        position,
    }
}

pub fn emoji(id: u64, name: &str) -> SourceEmoji {
    SourceEmoji {
        id,
        name: name.to_string(),
        url: format!("https://cdn.discordapp.com/emojis/{}.png", id),
    }
}

pub fn member(user_id: u64, username: &str, role_ids: Vec<u64>) -> SourceMember {
    SourceMember {
        user_id,
        username: username.to_string(),
        discriminator: None,
        avatar_url: None,
        joined_at: DateTime::<Utc>::from_timestamp(1_600_000_000, 0),
        role_ids,
        bot: false,
    }
}

pub fn message(author: &str, content: &str, sent_at_secs: i64) -> SourceMessage {
    SourceMessage {
        author_name: author.to_string(),
        author_avatar_url: None,
        content: content.to_string(),
        embeds: Vec::new(),
        attachments: Vec::new(),
        pinned: false,
        sent_at: DateTime::<Utc>::from_timestamp(sent_at_secs, 0).unwrap_or_default(),
    }
}
