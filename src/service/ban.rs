use tracing::debug;

use crate::{
    config::SnapshotOptions,
    error::SnapshotError,
    model::ban::BanEntry,
    source::GuildSource,
    util::timeout::with_timeout,
};

pub struct BanService<'a> {
    source: &'a dyn GuildSource,
    options: &'a SnapshotOptions,
}

impl<'a> BanService<'a> {
    pub fn new(source: &'a dyn GuildSource, options: &'a SnapshotOptions) -> Self {
        Self { source, options }
    }

    /// Returns the guild's ban list in the order the client returns it.
    ///
    /// # Returns
    /// - `Ok(Vec<BanEntry>)` - One entry per ban
    /// - `Err(SnapshotError)` - Fetch failed (e.g. missing ban permission) or timed out
    pub async fn get_bans(&self) -> Result<Vec<BanEntry>, SnapshotError> {
        let bans = with_timeout(
            self.options.request_timeout,
            "fetching bans",
            self.source.bans(),
        )
        .await?;

        debug!("Fetched {} bans", bans.len());

        Ok(bans
            .into_iter()
            .map(|ban| BanEntry {
                user_id: ban.user_id,
                reason: ban.reason,
            })
            .collect())
    }
}
