use tracing::debug;

use crate::{model::role::RoleEntry, source::GuildSource};

pub struct RoleService<'a> {
    source: &'a dyn GuildSource,
}

impl<'a> RoleService<'a> {
    pub fn new(source: &'a dyn GuildSource) -> Self {
        Self { source }
    }

    /// Returns restorable roles, highest position first.
    ///
    /// Managed roles are dropped since integrations recreate them. The guild's
    /// `@everyone` role shares the guild's ID and is flagged accordingly. Equal
    /// positions are ordered by role ID.
    pub fn get_roles(&self) -> Vec<RoleEntry> {
        let guild_id = self.source.guild().id;

        let mut roles: Vec<_> = self
            .source
            .roles()
            .into_iter()
            .filter(|role| !role.managed)
            .collect();
        roles.sort_by(|a, b| b.position.cmp(&a.position).then(a.id.cmp(&b.id)));

        debug!("Capturing {} unmanaged roles", roles.len());

        roles
            .into_iter()
            .map(|role| RoleEntry {
                is_everyone_role: role.id == guild_id,
                name: role.name,
                color_hex: format!("#{:06X}", role.color),
                hoist: role.hoist,
                permissions_bitfield: role.permissions,
                mentionable: role.mentionable,
                position: role.position,
            })
            .collect()
    }
}
