use tracing::debug;

use crate::{model::member::MemberEntry, source::GuildSource};

pub struct MemberService<'a> {
    source: &'a dyn GuildSource,
}

impl<'a> MemberService<'a> {
    pub fn new(source: &'a dyn GuildSource) -> Self {
        Self { source }
    }

    /// Maps the currently cached members.
    ///
    /// No fetch-all is forced, so guilds with lazy member caching produce an
    /// incomplete list. Order follows cache iteration and carries no meaning.
    pub fn get_members(&self) -> Vec<MemberEntry> {
        let members = self.source.members();

        debug!("Capturing {} cached members", members.len());

        members
            .into_iter()
            .map(|member| MemberEntry {
                user_id: member.user_id,
                username: member.username,
                discriminator: member.discriminator.map(|d| format!("{:04}", d)),
                avatar_url: member.avatar_url,
                joined_at: member.joined_at,
                role_ids: member.role_ids,
                is_bot: member.bot,
            })
            .collect()
    }
}
