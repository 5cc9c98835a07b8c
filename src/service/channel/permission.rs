use crate::{model::channel::PermissionOverwriteEntry, source::SourceOverwrite};

/// Maps platform overwrites onto serializable entries, keeping their order.
pub fn capture_overwrites(overwrites: &[SourceOverwrite]) -> Vec<PermissionOverwriteEntry> {
    overwrites
        .iter()
        .map(|overwrite| PermissionOverwriteEntry {
            subject_id: overwrite.subject_id,
            subject_type: overwrite.subject,
            allow: overwrite.allow,
            deny: overwrite.deny,
        })
        .collect()
}
