use serde::{Deserialize, Serialize};

use crate::util::string_id::{deserialize_u64_from_string, serialize_u64_as_string};

/// One entry of the guild's ban list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BanEntry {
    /// Banned user ID.
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub user_id: u64,
    /// Ban reason provided by the moderator, if any.
    pub reason: Option<String>,
}
