use base64::Engine as _;
use futures_util::future::try_join_all;
use tracing::debug;

use crate::{
    config::{ImageMode, SnapshotOptions},
    error::SnapshotError,
    model::emoji::{EmojiEntry, EmojiImage},
    source::{GuildSource, SourceEmoji},
    util::timeout::with_timeout,
};

pub struct EmojiService<'a> {
    source: &'a dyn GuildSource,
    options: &'a SnapshotOptions,
}

impl<'a> EmojiService<'a> {
    pub fn new(source: &'a dyn GuildSource, options: &'a SnapshotOptions) -> Self {
        Self { source, options }
    }

    /// Captures every cached emoji with either its remote URL or inlined image.
    ///
    /// In base64 mode all downloads run concurrently and are joined before
    /// returning. Output order follows the cache listing, not download completion.
    ///
    /// # Returns
    /// - `Ok(Vec<EmojiEntry>)` - One entry per cached emoji
    /// - `Err(SnapshotError)` - The first download that failed or timed out
    pub async fn get_emojis(&self) -> Result<Vec<EmojiEntry>, SnapshotError> {
        let emojis = self.source.emojis();

        match self.options.save_images {
            None => Ok(emojis
                .into_iter()
                .map(|emoji| EmojiEntry {
                    name: emoji.name,
                    image: EmojiImage::Url {
                        remote_url: emoji.url,
                    },
                })
                .collect()),
            Some(ImageMode::Base64) => {
                debug!("Downloading {} emoji images", emojis.len());
                try_join_all(emojis.iter().map(|emoji| self.capture_base64(emoji))).await
            }
        }
    }

    async fn capture_base64(&self, emoji: &SourceEmoji) -> Result<EmojiEntry, SnapshotError> {
        let bytes = with_timeout(
            self.options.request_timeout,
            format!("downloading emoji {} ({})", emoji.name, emoji.id),
            self.source.fetch_image(&emoji.url),
        )
        .await?;

        Ok(EmojiEntry {
            name: emoji.name.clone(),
            image: EmojiImage::Base64 {
                base64: base64::engine::general_purpose::STANDARD.encode(bytes),
            },
        })
    }
}
