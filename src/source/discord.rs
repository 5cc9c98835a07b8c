//! Serenity-backed guild handle.
//!
//! Wraps the `Guild` received from the gateway together with the bot's HTTP client.
//! Cached collections are read straight from the `Guild`; bans, messages, archived
//! threads and images go over the network. Conversion into source value types
//! happens here so that no serenity type leaks into the extractors.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serenity::all::{
    Ban, ChannelId, ChannelType, Emoji, GetMessages, Guild, GuildChannel, Member, Message,
    PermissionOverwrite, PermissionOverwriteType, Role, Timestamp, UserId,
};
use serenity::async_trait;
use serenity::http::{Http, LightMethod, Request, Route, UserPagination};
use serenity::model::channel::ThreadsData;
use tracing::{debug, trace, warn};

use crate::error::{internal::InternalError, SnapshotError};
use crate::model::channel::OverwriteSubject;
use crate::source::{
    ChannelKind, GuildInfo, GuildSource, SourceAttachment, SourceBan, SourceChannel, SourceEmoji,
    SourceMember, SourceMessage, SourceOverwrite, SourceRole, SourceThreadMetadata,
};

/// Maximum number of bans to fetch per API request.
///
/// The ban endpoint pages by user ID; a full page means another request is needed.
const BANS_PER_REQUEST: u8 = 200;

/// Maximum number of archived threads to fetch per API request.
const ARCHIVED_THREADS_PER_REQUEST: u8 = 100;

pub struct SerenityGuildSource {
    http: Arc<Http>,
    guild: Guild,
    client: reqwest::Client,
}

impl SerenityGuildSource {
    /// Creates a guild handle over a gateway-provided guild.
    ///
    /// # Arguments
    /// - `http` - Bot HTTP client for bans, messages and archived threads
    /// - `guild` - Guild as received in `guild_create`, holding the caches
    /// - `client` - Plain HTTP client used for CDN image downloads
    pub fn new(http: Arc<Http>, guild: Guild, client: reqwest::Client) -> Self {
        Self {
            http,
            guild,
            client,
        }
    }
}

#[async_trait]
impl GuildSource for SerenityGuildSource {
    fn guild(&self) -> GuildInfo {
        GuildInfo {
            id: self.guild.id.get(),
            name: self.guild.name.clone(),
            icon_url: self.guild.icon_url(),
        }
    }

    async fn bans(&self) -> Result<Vec<SourceBan>, SnapshotError> {
        let guild_id = self.guild.id;
        let http = Arc::clone(&self.http);

        collect_bans(move |after| {
            let http = Arc::clone(&http);
            async move {
                let page = guild_id
                    .bans(&*http, after.map(UserPagination::After), Some(BANS_PER_REQUEST))
                    .await?;
                trace!("Fetched {} bans for guild {}", page.len(), guild_id);
                Ok(page)
            }
        })
        .await
    }

    fn members(&self) -> Vec<SourceMember> {
        self.guild
            .members
            .values()
            .map(SourceMember::from_serenity)
            .collect()
    }

    fn roles(&self) -> Vec<SourceRole> {
        self.guild
            .roles
            .values()
            .map(SourceRole::from_serenity)
            .collect()
    }

    fn emojis(&self) -> Vec<SourceEmoji> {
        self.guild
            .emojis
            .values()
            .map(SourceEmoji::from_serenity)
            .collect()
    }

    fn channels(&self) -> Vec<SourceChannel> {
        self.guild
            .channels
            .values()
            .map(SourceChannel::from_serenity)
            .collect()
    }

    async fn messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<SourceMessage>, SnapshotError> {
        let messages = ChannelId::new(channel_id)
            .messages(&*self.http, GetMessages::new().limit(limit))
            .await?;

        messages.iter().map(SourceMessage::from_serenity).collect()
    }

    async fn threads(&self, channel_id: u64) -> Result<Vec<SourceChannel>, SnapshotError> {
        let parent = ChannelId::new(channel_id);

        let mut threads: Vec<SourceChannel> = self
            .guild
            .threads
            .iter()
            .filter(|thread| thread.parent_id == Some(parent))
            .map(SourceChannel::from_serenity)
            .collect();

        let public_pages = self.archived_page_fetcher(parent, false);
        let public = collect_archived_threads(public_pages).await?;

        // Archived private threads are only listed with MANAGE_THREADS
        let private_pages = self.archived_page_fetcher(parent, true);
        let private = match collect_archived_threads(private_pages).await {
            Ok(private) => private,
            Err(SnapshotError::PermissionDenied(reason)) => {
                warn!(
                    "Skipping archived private threads of channel {}: {}",
                    parent, reason
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        for thread in public.iter().chain(private.iter()) {
            if !threads.iter().any(|t| t.id == thread.id.get()) {
                threads.push(SourceChannel::from_serenity(thread));
            }
        }

        Ok(threads)
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SnapshotError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }
}

type ArchivedPage = Pin<Box<dyn Future<Output = Result<ThreadsData, SnapshotError>> + Send>>;

impl SerenityGuildSource {
    /// Returns a page fetcher for one archived thread listing of `parent`.
    ///
    /// Requests go through `Http::fire` directly because the listing pages by an
    /// ISO8601 `before` timestamp, which the typed channel helpers cannot pass.
    fn archived_page_fetcher(
        &self,
        parent: ChannelId,
        private: bool,
    ) -> impl FnMut(Option<String>) -> ArchivedPage {
        let http = Arc::clone(&self.http);

        move |before| {
            let http = Arc::clone(&http);
            Box::pin(async move {
                let route = if private {
                    Route::ChannelArchivedPrivateThreads { channel_id: parent }
                } else {
                    Route::ChannelArchivedPublicThreads { channel_id: parent }
                };

                let mut params = vec![("limit", ARCHIVED_THREADS_PER_REQUEST.to_string())];
                if let Some(before) = before {
                    params.push(("before", before));
                }

                let request = Request::new(route, LightMethod::Get).params(Some(params));
                let page: ThreadsData = http.fire(request).await?;
                Ok(page)
            })
        }
    }
}

/// Pages through the ban list by user ID until a short page comes back.
async fn collect_bans<F, Fut>(mut fetch_page: F) -> Result<Vec<SourceBan>, SnapshotError>
where
    F: FnMut(Option<UserId>) -> Fut,
    Fut: Future<Output = Result<Vec<Ban>, SnapshotError>>,
{
    let mut bans = Vec::new();
    let mut after: Option<UserId> = None;

    loop {
        let page = fetch_page(after).await?;

        let page_len = page.len();
        after = page.last().map(|ban| ban.user.id);
        bans.extend(page.iter().map(SourceBan::from_serenity));

        if page_len < BANS_PER_REQUEST as usize || after.is_none() {
            break;
        }
    }

    Ok(bans)
}

/// Pages through an archived thread listing, most recently archived first.
///
/// Each request asks for threads archived before the last thread of the previous
/// page and the listing ends once the platform reports no more threads.
async fn collect_archived_threads<F, Fut>(
    mut fetch_page: F,
) -> Result<Vec<GuildChannel>, SnapshotError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ThreadsData, SnapshotError>>,
{
    let mut threads = Vec::new();
    let mut before: Option<String> = None;

    loop {
        let page = fetch_page(before.clone()).await?;

        let next = page
            .threads
            .last()
            .and_then(|thread| thread.thread_metadata.as_ref())
            .and_then(|metadata| metadata.archive_timestamp)
            .and_then(|timestamp| timestamp.to_rfc3339());
        threads.extend(page.threads);

        if !page.has_more || next.is_none() || next == before {
            break;
        }
        before = next;
    }

    Ok(threads)
}

/// Converts a serenity timestamp to chrono, keeping sub-second precision.
fn to_utc(timestamp: Timestamp) -> Result<DateTime<Utc>, InternalError> {
    timestamp
        .to_rfc3339()
        .and_then(|formatted| DateTime::parse_from_rfc3339(&formatted).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok_or(InternalError::InvalidDiscordTimestamp {
            timestamp: timestamp.unix_timestamp(),
        })
}

impl SourceBan {
    pub fn from_serenity(ban: &Ban) -> Self {
        Self {
            user_id: ban.user.id.get(),
            reason: ban.reason.clone(),
        }
    }
}

impl SourceMember {
    /// Converts a cached serenity member.
    ///
    /// A join date the platform reports out of chrono's range is dropped rather
    /// than failing the whole member listing.
    pub fn from_serenity(member: &Member) -> Self {
        let joined_at = member.joined_at.and_then(|timestamp| {
            to_utc(timestamp)
                .map_err(|e| debug!("Dropping join date of member {}: {}", member.user.id, e))
                .ok()
        });

        Self {
            user_id: member.user.id.get(),
            username: member.user.name.clone(),
            discriminator: member.user.discriminator.map(|d| d.get()),
            avatar_url: member.user.avatar_url(),
            joined_at,
            role_ids: member.roles.iter().map(|id| id.get()).collect(),
            bot: member.user.bot,
        }
    }
}

impl SourceRole {
    pub fn from_serenity(role: &Role) -> Self {
        Self {
            id: role.id.get(),
            name: role.name.clone(),
            color: role.colour.0,
            hoist: role.hoist,
            managed: role.managed,
            mentionable: role.mentionable,
            permissions: role.permissions.bits(),
            position: role.position,
        }
    }
}

impl SourceEmoji {
    pub fn from_serenity(emoji: &Emoji) -> Self {
        Self {
            id: emoji.id.get(),
            name: emoji.name.clone(),
            url: emoji.url(),
        }
    }
}

impl SourceOverwrite {
    /// Converts a serenity overwrite, returning `None` for subject kinds this
    /// crate does not know about.
    pub fn from_serenity(overwrite: &PermissionOverwrite) -> Option<Self> {
        let (subject_id, subject) = match overwrite.kind {
            PermissionOverwriteType::Role(role_id) => (role_id.get(), OverwriteSubject::Role),
            PermissionOverwriteType::Member(user_id) => (user_id.get(), OverwriteSubject::Member),
            _ => return None,
        };

        Some(Self {
            subject_id,
            subject,
            allow: overwrite.allow.bits(),
            deny: overwrite.deny.bits(),
        })
    }
}

impl SourceChannel {
    pub fn from_serenity(channel: &GuildChannel) -> Self {
        Self {
            id: channel.id.get(),
            name: channel.name.clone(),
            kind: ChannelKind::from(channel.kind),
            position: channel.position,
            parent_id: channel.parent_id.map(|id| id.get()),
            overwrites: channel
                .permission_overwrites
                .iter()
                .filter_map(SourceOverwrite::from_serenity)
                .collect(),
            topic: channel.topic.clone(),
            nsfw: channel.nsfw,
            rate_limit_per_user: channel.rate_limit_per_user.unwrap_or(0),
            bitrate: channel.bitrate,
            user_limit: channel.user_limit,
            thread: channel
                .thread_metadata
                .as_ref()
                .map(|metadata| SourceThreadMetadata {
                    archived: metadata.archived,
                    locked: metadata.locked,
                    auto_archive_duration: u16::from(metadata.auto_archive_duration),
                }),
        }
    }
}

impl SourceMessage {
    pub fn from_serenity(message: &Message) -> Result<Self, SnapshotError> {
        let embeds = message
            .embeds
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            author_name: message.author.name.clone(),
            author_avatar_url: message.author.avatar_url(),
            content: message.content.clone(),
            embeds,
            attachments: message
                .attachments
                .iter()
                .map(|attachment| SourceAttachment {
                    filename: attachment.filename.clone(),
                    url: attachment.url.clone(),
                })
                .collect(),
            pinned: message.pinned,
            sent_at: to_utc(message.timestamp)?,
        })
    }
}

impl From<ChannelType> for ChannelKind {
    fn from(kind: ChannelType) -> Self {
        match kind {
            ChannelType::Text => Self::Text,
            ChannelType::News => Self::News,
            ChannelType::Voice => Self::Voice,
            ChannelType::Stage => Self::Stage,
            ChannelType::Category => Self::Category,
            ChannelType::Forum => Self::Forum,
            ChannelType::NewsThread => Self::NewsThread,
            ChannelType::PublicThread => Self::PublicThread,
            ChannelType::PrivateThread => Self::PrivateThread,
            other => Self::Other(u8::from(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::{ChannelId, EmojiId, Permissions, RoleId};
    use test_utils::serenity::{
        create_test_archived_thread, create_test_ban, create_test_channel, create_test_emoji,
        create_test_guild, create_test_member, create_test_message, create_test_role,
        create_test_user,
    };

    fn source_with(guild: Guild) -> SerenityGuildSource {
        SerenityGuildSource::new(Arc::new(Http::new("")), guild, reqwest::Client::new())
    }

    /// Tests guild identity is read from the gateway guild.
    ///
    /// Expected: id and name copied, no icon URL without icon hash
    #[test]
    fn guild_info_copies_identity() {
        let source = source_with(create_test_guild(123456789, "Test Guild"));

        let info = source.guild();

        assert_eq!(info.id, 123456789);
        assert_eq!(info.name, "Test Guild");
        assert!(info.icon_url.is_none());
    }

    /// Tests roles are converted from the guild's role cache.
    ///
    /// Expected: one source role per cached role with color and position preserved
    #[test]
    fn roles_convert_from_role_cache() {
        let mut guild = create_test_guild(123456789, "Test Guild");
        guild.roles.insert(
            RoleId::new(111111111),
            create_test_role(111111111, "Admin", 0xFF0000, 10),
        );

        let roles = source_with(guild).roles();

        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].id, 111111111);
        assert_eq!(roles[0].name, "Admin");
        assert_eq!(roles[0].color, 0xFF0000);
        assert_eq!(roles[0].position, 10);
        assert!(!roles[0].managed);
    }

    /// Tests channel kind, position and parent linkage survive conversion.
    ///
    /// Expected: text channel parented to its category
    #[test]
    fn channels_keep_kind_position_and_parent() {
        let mut guild = create_test_guild(123456789, "Test Guild");
        guild.channels.insert(
            ChannelId::new(500),
            create_test_channel(500, 123456789, "Info", 4, 3, None, &[]),
        );
        guild.channels.insert(
            ChannelId::new(501),
            create_test_channel(501, 123456789, "rules", 0, 2, Some(500), &[]),
        );

        let mut channels = source_with(guild).channels();
        channels.sort_by_key(|c| c.id);

        assert_eq!(channels[0].kind, ChannelKind::Category);
        assert_eq!(channels[0].position, 3);
        assert_eq!(channels[0].parent_id, None);
        assert_eq!(channels[1].kind, ChannelKind::Text);
        assert_eq!(channels[1].name, "rules");
        assert_eq!(channels[1].parent_id, Some(500));
    }

    /// Tests emoji conversion resolves the CDN URL.
    ///
    /// Expected: URL contains the emoji id
    #[test]
    fn emojis_resolve_cdn_url() {
        let mut guild = create_test_guild(123456789, "Test Guild");
        guild
            .emojis
            .insert(EmojiId::new(777), create_test_emoji(777, "blob", false));

        let emojis = source_with(guild).emojis();

        assert_eq!(emojis.len(), 1);
        assert_eq!(emojis[0].name, "blob");
        assert!(emojis[0].url.contains("777"));
    }

    /// Tests the platform channel types map onto the closed kind set.
    #[test]
    fn channel_types_map_to_kinds() {
        assert_eq!(ChannelKind::from(ChannelType::Text), ChannelKind::Text);
        assert_eq!(ChannelKind::from(ChannelType::News), ChannelKind::News);
        assert_eq!(
            ChannelKind::from(ChannelType::PublicThread),
            ChannelKind::PublicThread
        );
        assert_eq!(
            ChannelKind::from(ChannelType::Directory),
            ChannelKind::Other(14)
        );
    }

    /// Tests member conversion keeps the legacy tag, role order and join time.
    ///
    /// Expected: discriminator 42, roles in Discord's order, join time to the millisecond
    #[test]
    fn member_keeps_tag_roles_and_join_time() {
        let user = create_test_user(100, "alice", Some("0042"));
        let member = create_test_member(
            123456789,
            user,
            &[30, 10, 20],
            Some("2020-01-01T00:00:00.789+00:00"),
        );

        let converted = SourceMember::from_serenity(&member);

        assert_eq!(converted.user_id, 100);
        assert_eq!(converted.username, "alice");
        assert_eq!(converted.discriminator, Some(42));
        assert_eq!(converted.role_ids, vec![30, 10, 20]);
        let joined_at = converted.joined_at.unwrap();
        assert_eq!(joined_at.timestamp(), 1_577_836_800);
        assert_eq!(joined_at.timestamp_subsec_millis(), 789);
        assert!(!converted.bot);
    }

    /// Tests a migrated account without a tag or join time converts cleanly.
    ///
    /// Expected: no discriminator, no join date
    #[test]
    fn migrated_member_has_no_tag() {
        let member = create_test_member(123456789, create_test_user(101, "bob", None), &[], None);

        let converted = SourceMember::from_serenity(&member);

        assert_eq!(converted.discriminator, None);
        assert_eq!(converted.joined_at, None);
        assert!(converted.role_ids.is_empty());
    }

    /// Tests channel overwrites keep their subject kind and permission bits.
    ///
    /// Expected: role overwrite and member overwrite with allow/deny untouched
    #[test]
    fn overwrites_keep_subject_and_bits() {
        let overwrites = [
            PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL,
                deny: Permissions::SEND_MESSAGES,
                kind: PermissionOverwriteType::Role(RoleId::new(7)),
            },
            PermissionOverwrite {
                allow: Permissions::SEND_MESSAGES,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(UserId::new(100)),
            },
        ];
        let channel = create_test_channel(501, 123456789, "rules", 0, 2, None, &overwrites);

        let converted = SourceChannel::from_serenity(&channel);

        assert_eq!(converted.overwrites.len(), 2);
        assert_eq!(converted.overwrites[0].subject_id, 7);
        assert_eq!(converted.overwrites[0].subject, OverwriteSubject::Role);
        assert_eq!(converted.overwrites[0].allow, Permissions::VIEW_CHANNEL.bits());
        assert_eq!(converted.overwrites[0].deny, Permissions::SEND_MESSAGES.bits());
        assert_eq!(converted.overwrites[1].subject_id, 100);
        assert_eq!(converted.overwrites[1].subject, OverwriteSubject::Member);
        assert_eq!(converted.overwrites[1].allow, Permissions::SEND_MESSAGES.bits());
        assert_eq!(converted.overwrites[1].deny, 0);
    }

    /// Tests message conversion carries embeds, attachments and send time.
    ///
    /// Expected: embed as JSON, attachment name and URL, millisecond send time
    #[test]
    fn message_keeps_embeds_and_attachments() {
        let message = create_test_message(
            900,
            501,
            "alice",
            "Form up at the gate",
            "2024-03-01T18:30:00.250+00:00",
        );

        let converted = SourceMessage::from_serenity(&message).unwrap();

        assert_eq!(converted.author_name, "alice");
        assert_eq!(converted.content, "Form up at the gate");
        assert!(converted.pinned);
        assert_eq!(converted.embeds.len(), 1);
        assert_eq!(converted.embeds[0]["title"], "Fleet up");
        assert_eq!(converted.attachments.len(), 1);
        assert_eq!(converted.attachments[0].filename, "map.png");
        assert_eq!(
            converted.attachments[0].url,
            "https://cdn.discordapp.com/attachments/1/2/map.png"
        );
        assert_eq!(converted.sent_at.timestamp_subsec_millis(), 250);
    }

    /// Tests ban paging continues after a full page and stops on a short one.
    ///
    /// Expected: two requests, the second after the last user of the first page
    #[tokio::test]
    async fn bans_page_until_short_page() {
        let mut requests = Vec::new();

        let bans = collect_bans(|after| {
            requests.push(after);
            let page: Vec<Ban> = match after {
                None => (1..=BANS_PER_REQUEST as u64)
                    .map(|id| create_test_ban(id, None))
                    .collect(),
                Some(_) => vec![
                    create_test_ban(201, Some("spam")),
                    create_test_ban(202, None),
                ],
            };
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(bans.len(), BANS_PER_REQUEST as usize + 2);
        assert_eq!(bans[200].user_id, 201);
        assert_eq!(bans[200].reason.as_deref(), Some("spam"));
        assert_eq!(requests, vec![None, Some(UserId::new(200))]);
    }

    /// Tests an empty ban list needs a single request.
    #[tokio::test]
    async fn empty_ban_list_stops_after_one_request() {
        let mut requests = 0;

        let bans = collect_bans(|_| {
            requests += 1;
            async { Ok(Vec::new()) }
        })
        .await
        .unwrap();

        assert!(bans.is_empty());
        assert_eq!(requests, 1);
    }

    fn threads_page(threads: Vec<GuildChannel>, has_more: bool) -> ThreadsData {
        serde_json::from_value(serde_json::json!({
            "threads": threads,
            "members": [],
            "has_more": has_more,
        }))
        .unwrap()
    }

    fn rfc3339(value: &str) -> Option<String> {
        Timestamp::parse(value).unwrap().to_rfc3339()
    }

    /// Tests archived threads are paged by archive time while more are reported.
    ///
    /// Expected: both pages collected, second request before the oldest thread of
    /// the first page
    #[tokio::test]
    async fn archived_threads_page_by_archive_time() {
        let mut requests = Vec::new();

        let threads = collect_archived_threads(|before| {
            requests.push(before.clone());
            let page = match before {
                None => threads_page(
                    vec![
                        create_test_archived_thread(
                            601,
                            123456789,
                            501,
                            "ops",
                            "2024-03-02T12:00:00.000+00:00",
                        ),
                        create_test_archived_thread(
                            602,
                            123456789,
                            501,
                            "logi",
                            "2024-03-01T10:00:00.500+00:00",
                        ),
                    ],
                    true,
                ),
                Some(_) => threads_page(
                    vec![create_test_archived_thread(
                        603,
                        123456789,
                        501,
                        "old",
                        "2024-02-01T00:00:00.000+00:00",
                    )],
                    false,
                ),
            };
            async move { Ok(page) }
        })
        .await
        .unwrap();

        let ids: Vec<u64> = threads.iter().map(|thread| thread.id.get()).collect();
        assert_eq!(ids, vec![601, 602, 603]);
        assert_eq!(
            requests,
            vec![None, rfc3339("2024-03-01T10:00:00.500+00:00")]
        );
    }

    /// Tests a listing that keeps reporting more threads without moving on stops.
    ///
    /// Expected: second request repeats the cursor, paging ends there
    #[tokio::test]
    async fn archived_threads_stop_when_cursor_repeats() {
        let mut requests = 0;

        let threads = collect_archived_threads(|_| {
            requests += 1;
            let page = threads_page(
                vec![create_test_archived_thread(
                    601,
                    123456789,
                    501,
                    "ops",
                    "2024-03-02T12:00:00.000+00:00",
                )],
                true,
            );
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(requests, 2);
        assert_eq!(threads.len(), 2);
    }
}
