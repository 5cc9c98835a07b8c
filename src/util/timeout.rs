use std::future::Future;
use std::time::Duration;

use crate::error::SnapshotError;

/// Runs a network-bound step with an upper bound on its duration.
///
/// # Arguments
/// - `after` - Maximum time the step may take
/// - `operation` - Description used in the timeout error, e.g. "fetching bans"
/// - `future` - The step itself
///
/// # Returns
/// - The step's own result if it finishes in time
/// - `Err(SnapshotError::Timeout)` - The step did not finish within `after`
pub async fn with_timeout<T, F>(
    after: Duration,
    operation: impl Into<String>,
    future: F,
) -> Result<T, SnapshotError>
where
    F: Future<Output = Result<T, SnapshotError>>,
{
    tokio::time::timeout(after, future)
        .await
        .map_err(|_| SnapshotError::Timeout {
            operation: operation.into(),
            after,
        })?
}
