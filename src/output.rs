use std::path::Path;

use tracing::info;

use crate::{error::SnapshotError, model::snapshot::GuildSnapshot};

/// Writes a snapshot as JSON.
///
/// # Arguments
/// - `path` - Destination file, replaced if it exists
/// - `snapshot` - Snapshot to encode
/// - `pretty` - Indent the output for human reading
pub async fn write_snapshot(
    path: &Path,
    snapshot: &GuildSnapshot,
    pretty: bool,
) -> Result<(), SnapshotError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(snapshot)?
    } else {
        serde_json::to_vec(snapshot)?
    };

    tokio::fs::write(path, &bytes).await?;

    info!(
        "Wrote snapshot of guild {} to {} ({} bytes)",
        snapshot.guild_id,
        path.display(),
        bytes.len()
    );

    Ok(())
}
