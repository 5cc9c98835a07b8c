//! Error types for snapshot extraction.
//!
//! `SnapshotError` is the top-level error returned by every extractor. It follows
//! the platform's failure taxonomy (permission denied, not found, rate limited,
//! network failure) so callers can decide on retry or backoff themselves. Nothing
//! in this crate retries; errors propagate unchanged to the caller.

pub mod config;
pub mod internal;

use std::time::Duration;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError};

/// Top-level extraction error type.
///
/// Most variants use `#[from]` for automatic error conversion. Serenity errors
/// are classified by HTTP status where possible so that permission and
/// not-found failures are distinguishable from generic client errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Internal conversion failure at the client library boundary.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// The platform rejected a request because the bot lacks a permission or scope.
    ///
    /// # Fields
    /// - Description of the rejected request
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The guild or a channel vanished while the snapshot was being taken.
    ///
    /// # Fields
    /// - Description of the missing resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// The platform throttled a request.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// A network-bound step did not complete within the configured timeout.
    #[error("Timed out after {after:?} while {operation}")]
    Timeout {
        /// Human readable name of the step that timed out
        operation: String,
        /// The timeout that elapsed
        after: Duration,
    },

    /// HTTP client request error from reqwest, e.g. an emoji image download.
    #[error(transparent)]
    NetworkErr(#[from] reqwest::Error),

    /// Discord API error from Serenity that is not otherwise classified.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Snapshot could not be encoded as JSON.
    #[error(transparent)]
    SerializeErr(#[from] serde_json::Error),

    /// Snapshot could not be written to disk.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),
}

/// Manual conversion from serenity::Error to SnapshotError.
///
/// Unsuccessful HTTP responses are mapped onto the extraction failure taxonomy
/// by status code:
/// - 403 → `PermissionDenied`
/// - 404 → `NotFound`
/// - 429 → `RateLimited`
///
/// Everything else is boxed into `DiscordErr`, as serenity::Error is very large
/// and would make all SnapshotError variants larger if not boxed.
impl From<serenity::Error> for SnapshotError {
    fn from(err: serenity::Error) -> Self {
        if let serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response)) =
            &err
        {
            let message = format!("{} ({})", response.url, response.error.message);

            match response.status_code.as_u16() {
                403 => return SnapshotError::PermissionDenied(message),
                404 => return SnapshotError::NotFound(message),
                429 => return SnapshotError::RateLimited(message),
                _ => {}
            }
        }

        SnapshotError::DiscordErr(Box::new(err))
    }
}
