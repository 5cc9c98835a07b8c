use serde::{Deserialize, Serialize};

/// A custom guild emoji together with its image.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmojiEntry {
    /// Emoji name as used in `:name:` syntax.
    pub name: String,
    /// Either the remote URL or the inlined image, never both.
    #[serde(flatten)]
    pub image: EmojiImage,
}

/// How an emoji's image was captured.
///
/// Serialized untagged into the parent entry, producing either a `remoteUrl` or a
/// `base64` key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum EmojiImage {
    Url {
        #[serde(rename = "remoteUrl")]
        remote_url: String,
    },
    Base64 {
        base64: String,
    },
}

#[cfg(test)]
impl EmojiEntry {
    pub fn remote_url(&self) -> Option<&str> {
        match &self.image {
            EmojiImage::Url { remote_url } => Some(remote_url),
            EmojiImage::Base64 { .. } => None,
        }
    }

    pub fn base64(&self) -> Option<&str> {
        match &self.image {
            EmojiImage::Base64 { base64 } => Some(base64),
            EmojiImage::Url { .. } => None,
        }
    }
}
