use crate::config::SnapshotOptions;
use crate::error::SnapshotError;
use crate::model::channel::{ChannelEntry, ChannelTree};
use crate::service::channel::ChannelService;
use crate::source::fake::{
    category, channel, role_overwrite, text_channel, thread, voice_channel, FakeGuildSource,
};
use crate::source::ChannelKind;

mod placement;

fn names(entries: &[ChannelEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.name()).collect()
}

async fn capture(source: &FakeGuildSource) -> Result<ChannelTree, SnapshotError> {
    let options = SnapshotOptions {
        max_messages_per_channel: 0,
        ..Default::default()
    };
    ChannelService::new(source, &options).get_channels().await
}
