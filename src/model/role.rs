use serde::{Deserialize, Serialize};

use crate::util::string_id::{deserialize_u64_from_string, serialize_u64_as_string};

/// A restorable guild role. Managed roles never appear here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleEntry {
    /// Role display name.
    pub name: String,
    /// Role color in hex format (e.g., "#FF5733").
    pub color_hex: String,
    /// Whether members with this role are displayed separately.
    pub hoist: bool,
    /// Permission bitfield, encoded as a decimal string.
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub permissions_bitfield: u64,
    /// Whether the role can be mentioned by anyone.
    pub mentionable: bool,
    /// Role position in the guild's role hierarchy (higher = more important).
    pub position: u16,
    /// Whether this is the guild's implicit `@everyone` role.
    pub is_everyone_role: bool,
}
