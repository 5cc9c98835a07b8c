use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message captured from a text channel or thread.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageEntry {
    /// Author's username at the time of the snapshot.
    pub username: String,
    /// Author's avatar URL, used to replay the message through a webhook.
    pub avatar_url: Option<String>,
    pub content: String,
    /// Embeds in the platform's own JSON shape.
    pub embeds: Vec<serde_json::Value>,
    pub attachments: Vec<AttachmentEntry>,
    pub pinned: bool,
    pub sent_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentEntry {
    pub name: String,
    pub url: String,
}
