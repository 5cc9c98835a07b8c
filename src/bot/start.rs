use std::time::Duration;

use serenity::all::{Client, GatewayIntents, GuildId};
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::{
    bot::handler::Handler, config::Config, error::SnapshotError, model::snapshot::GuildSnapshot,
    service::SnapshotService, source::SerenityGuildSource,
};

/// Connects to Discord, captures the configured guild and disconnects.
///
/// The gateway delivers the guild with its caches populated in `guild_create`.
/// The handler hands it back here and the snapshot runs once it has arrived, so
/// `ready_timeout` bounds only the wait for the guild. Each network step of the
/// extraction is bounded by `request_timeout` instead.
///
/// # Arguments
/// - `config` - Application configuration
///
/// # Returns
/// - `Ok(GuildSnapshot)` - Snapshot of the configured guild
/// - `Err(SnapshotError::NotFound)` - Guild never arrived within `ready_timeout`
/// - `Err(SnapshotError)` - Client startup or extraction failed
pub async fn run_snapshot(config: &Config) -> Result<GuildSnapshot, SnapshotError> {
    // GUILD_MEMBERS and MESSAGE_CONTENT are privileged intents - must be enabled in
    // the Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MODERATION
        | GatewayIntents::GUILD_EMOJIS_AND_STICKERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let guild_id = GuildId::new(config.guild_id);
    let (sender, receiver) = oneshot::channel();
    let handler = Handler::new(guild_id, sender);

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;
    let shard_manager = client.shard_manager.clone();

    info!("Starting Discord bot...");

    let mut bot = tokio::spawn(async move { client.start().await });

    let arrived = tokio::select! {
        arrived = wait_for_guild(receiver, config.ready_timeout, guild_id) => arrived,
        finished = &mut bot => {
            match finished {
                Ok(Err(e)) => Err(e.into()),
                Ok(Ok(())) => Err(not_available(guild_id, None)),
                Err(e) => {
                    error!("Discord bot task failed: {}", e);
                    Err(not_available(guild_id, None))
                }
            }
        }
    };

    let result = match arrived {
        Ok(arrived) => {
            let source =
                SerenityGuildSource::new(arrived.http, arrived.guild, reqwest::Client::new());
            SnapshotService::new(&source, &config.options).create().await
        }
        Err(e) => Err(e),
    };

    shard_manager.shutdown_all().await;

    result
}

/// Waits for the handler to hand over the configured guild.
///
/// # Returns
/// - `Ok(T)` - The guild arrived within `ready_timeout`
/// - `Err(SnapshotError::NotFound)` - Timed out, or the handler went away first
async fn wait_for_guild<T>(
    receiver: oneshot::Receiver<T>,
    ready_timeout: Duration,
    guild_id: GuildId,
) -> Result<T, SnapshotError> {
    match tokio::time::timeout(ready_timeout, receiver).await {
        Ok(Ok(arrived)) => Ok(arrived),
        Ok(Err(_)) => Err(not_available(guild_id, None)),
        Err(_) => Err(not_available(guild_id, Some(ready_timeout))),
    }
}

fn not_available(guild_id: GuildId, waited: Option<Duration>) -> SnapshotError {
    match waited {
        Some(waited) => SnapshotError::NotFound(format!(
            "guild {} did not become available within {:?}",
            guild_id, waited
        )),
        None => SnapshotError::NotFound(format!(
            "gateway closed before guild {} became available",
            guild_id
        )),
    }
}
