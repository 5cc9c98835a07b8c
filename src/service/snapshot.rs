use chrono::Utc;
use tracing::{debug, info};

use crate::{
    config::{SnapshotOptions, SnapshotSection},
    error::SnapshotError,
    model::{channel::ChannelTree, snapshot::GuildSnapshot},
    service::{
        ban::BanService, channel::ChannelService, emoji::EmojiService, member::MemberService,
        role::RoleService,
    },
    source::GuildSource,
};

pub struct SnapshotService<'a> {
    source: &'a dyn GuildSource,
    options: &'a SnapshotOptions,
}

impl<'a> SnapshotService<'a> {
    pub fn new(source: &'a dyn GuildSource, options: &'a SnapshotOptions) -> Self {
        Self { source, options }
    }

    /// Captures every section of the guild not listed in `options.skip`.
    ///
    /// Sections run one after another: bans, members, roles, emojis, channels.
    /// Any failure aborts the snapshot and is returned unchanged.
    ///
    /// # Returns
    /// - `Ok(GuildSnapshot)` - Complete snapshot, skipped sections empty
    /// - `Err(SnapshotError)` - The first section that failed
    pub async fn create(&self) -> Result<GuildSnapshot, SnapshotError> {
        let guild = self.source.guild();

        info!("Creating snapshot of guild {} ({})", guild.name, guild.id);

        let bans = if self.includes(SnapshotSection::Bans) {
            BanService::new(self.source, self.options).get_bans().await?
        } else {
            Vec::new()
        };

        let members = if self.includes(SnapshotSection::Members) {
            MemberService::new(self.source).get_members()
        } else {
            Vec::new()
        };

        let roles = if self.includes(SnapshotSection::Roles) {
            RoleService::new(self.source).get_roles()
        } else {
            Vec::new()
        };

        let emojis = if self.includes(SnapshotSection::Emojis) {
            EmojiService::new(self.source, self.options)
                .get_emojis()
                .await?
        } else {
            Vec::new()
        };

        let channels = if self.includes(SnapshotSection::Channels) {
            ChannelService::new(self.source, self.options)
                .get_channels()
                .await?
        } else {
            ChannelTree::default()
        };

        info!(
            "Snapshot of guild {} done: {} bans, {} members, {} roles, {} emojis, {} categories",
            guild.id,
            bans.len(),
            members.len(),
            roles.len(),
            emojis.len(),
            channels.categories.len()
        );

        Ok(GuildSnapshot {
            guild_id: guild.id,
            name: guild.name,
            icon_url: guild.icon_url,
            created_at: Utc::now(),
            bans,
            members,
            roles,
            emojis,
            channels,
        })
    }

    fn includes(&self, section: SnapshotSection) -> bool {
        let included = self.options.includes(section);
        if !included {
            debug!("Skipping {:?} section", section);
        }
        included
    }
}
