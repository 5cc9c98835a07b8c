//! Gateway event handling for a one-shot snapshot run.
//!
//! `guild_create` fires for every guild the bot is in once the shard connects.
//! Only the configured guild is handed back to the runner, and only the first
//! time it arrives; later events (e.g. after an outage) are ignored.

use std::sync::Arc;

use serenity::all::{Context, EventHandler, Guild, GuildId, Ready};
use serenity::async_trait;
use serenity::http::Http;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, warn};

/// The configured guild as delivered by the gateway, with its caches populated.
pub struct ArrivedGuild {
    pub http: Arc<Http>,
    pub guild: Guild,
}

/// Discord bot event handler
pub struct Handler {
    guild_id: GuildId,
    arrival: Mutex<Option<oneshot::Sender<ArrivedGuild>>>,
}

impl Handler {
    pub fn new(guild_id: GuildId, arrival: oneshot::Sender<ArrivedGuild>) -> Self {
        Self {
            guild_id,
            arrival: Mutex::new(Some(arrival)),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected to Discord!", ready.user.name);

        if !ready.guilds.iter().any(|guild| guild.id == self.guild_id) {
            warn!(
                "Bot is not a member of guild {}; no snapshot will be taken",
                self.guild_id
            );
        }
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, _is_new: Option<bool>) {
        if guild.id != self.guild_id {
            debug!("Ignoring guild {} ({})", guild.name, guild.id);
            return;
        }

        let Some(sender) = self.arrival.lock().await.take() else {
            debug!("Guild {} already handed off", guild.id);
            return;
        };

        debug!(
            "Guild create event: {} ({}) - member_count: {}, cached_members: {}",
            guild.name,
            guild.id,
            guild.member_count,
            guild.members.len()
        );

        let arrived = ArrivedGuild {
            http: ctx.http.clone(),
            guild,
        };

        if sender.send(arrived).is_err() {
            warn!("Guild arrived after the runner stopped waiting");
        }
    }
}
