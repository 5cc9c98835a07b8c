//! Channel hierarchy capture.
//!
//! Builds the two-level channel tree the restoration side needs to recreate the
//! guild in its original visual order:
//!
//! 1. Categories, sorted by ascending position, define category order.
//! 2. Each category's children, sorted by ascending position, are captured in order.
//! 3. Channels without a cached parent category go to `others`, sorted the same way.
//!
//! Categories and the three thread kinds are never standalone nodes. Threads are
//! captured by their parent text channel instead.
//!
//! Extraction is all-or-nothing: the first channel that fails to capture aborts
//! the whole tree and its error is returned unchanged.

mod permission;
mod text;
mod voice;

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{
    config::SnapshotOptions,
    error::SnapshotError,
    model::channel::{CategoryEntry, ChannelEntry, ChannelTree},
    source::{ChannelKind, ChannelRoute, GuildSource, SourceChannel},
};

pub use permission::capture_overwrites;
pub use text::TextChannelCapture;
pub use voice::capture_voice_channel;

pub struct ChannelService<'a> {
    source: &'a dyn GuildSource,
    options: &'a SnapshotOptions,
}

impl<'a> ChannelService<'a> {
    pub fn new(source: &'a dyn GuildSource, options: &'a SnapshotOptions) -> Self {
        Self { source, options }
    }

    /// Captures the guild's channel tree.
    ///
    /// # Returns
    /// - `Ok(ChannelTree)` - Categories and top level channels in position order
    /// - `Err(SnapshotError)` - A channel failed to capture; no partial tree is returned
    pub async fn get_channels(&self) -> Result<ChannelTree, SnapshotError> {
        let channels = self.source.channels();

        let mut categories: Vec<&SourceChannel> = channels
            .iter()
            .filter(|channel| channel.kind == ChannelKind::Category)
            .collect();
        sort_by_position(&mut categories);

        let category_ids: HashSet<u64> = categories.iter().map(|category| category.id).collect();

        let mut tree = ChannelTree::default();

        for category in categories {
            let mut children: Vec<&SourceChannel> = channels
                .iter()
                .filter(|channel| channel.parent_id == Some(category.id))
                .filter(|channel| channel.kind.route() != ChannelRoute::Excluded)
                .collect();
            sort_by_position(&mut children);

            let mut entry = CategoryEntry {
                name: category.name.clone(),
                permission_overwrites: capture_overwrites(&category.overwrites),
                children: Vec::with_capacity(children.len()),
            };

            for child in children {
                if let Some(child_entry) = self.capture_channel(child).await? {
                    entry.children.push(child_entry);
                }
            }

            trace!(
                "Captured category {} with {} children",
                entry.name,
                entry.children.len()
            );

            tree.categories.push(entry);
        }

        let mut others: Vec<&SourceChannel> = channels
            .iter()
            .filter(|channel| {
                !channel
                    .parent_id
                    .is_some_and(|parent_id| category_ids.contains(&parent_id))
            })
            .filter(|channel| channel.kind.route() != ChannelRoute::Excluded)
            .collect();
        sort_by_position(&mut others);

        for channel in others {
            if let Some(entry) = self.capture_channel(channel).await? {
                tree.others.push(entry);
            }
        }

        debug!(
            "Captured {} categories and {} top level channels",
            tree.categories.len(),
            tree.others.len()
        );

        Ok(tree)
    }

    /// Dispatches one channel to the mapper for its kind.
    ///
    /// # Returns
    /// - `Ok(Some(ChannelEntry))` - Text-like or voice-like channel captured
    /// - `Ok(None)` - Category or thread, which are not standalone entries
    /// - `Err(SnapshotError)` - Capture failed
    async fn capture_channel(
        &self,
        channel: &SourceChannel,
    ) -> Result<Option<ChannelEntry>, SnapshotError> {
        match channel.kind.route() {
            ChannelRoute::Text => {
                let entry = TextChannelCapture::new(self.source, self.options)
                    .capture(channel)
                    .await?;
                Ok(Some(ChannelEntry::Text(entry)))
            }
            ChannelRoute::Voice => Ok(Some(ChannelEntry::Voice(capture_voice_channel(channel)))),
            ChannelRoute::Excluded => {
                trace!("Skipping {:?} channel {}", channel.kind, channel.id);
                Ok(None)
            }
        }
    }
}

/// Sorts ascending by position; ties fall back to channel ID so output does not
/// depend on cache iteration order.
fn sort_by_position(channels: &mut [&SourceChannel]) {
    channels.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod test;
