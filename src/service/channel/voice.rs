use crate::{
    model::channel::VoiceChannelEntry, service::channel::permission::capture_overwrites,
    source::SourceChannel,
};

/// Captures a voice-like channel. Everything needed is already cached.
pub fn capture_voice_channel(channel: &SourceChannel) -> VoiceChannelEntry {
    VoiceChannelEntry {
        name: channel.name.clone(),
        bitrate: channel.bitrate,
        user_limit: channel.user_limit,
        permission_overwrites: capture_overwrites(&channel.overwrites),
    }
}
