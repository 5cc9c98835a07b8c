//! Serde helpers for 64-bit values.
//!
//! Snowflakes and permission bitfields exceed the 53 bits a JSON number can carry
//! losslessly in most consumers, so they are written as decimal strings.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize_u64_as_string<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize_u64_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    String::deserialize(deserializer)?
        .parse::<u64>()
        .map_err(D::Error::custom)
}

/// Same as [`serialize_u64_as_string`] for a list of ids.
pub fn serialize_u64_vec_as_strings<S>(values: &[u64], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(values.iter().map(|v| v.to_string()))
}

pub fn deserialize_u64_vec_from_strings<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    Vec::<String>::deserialize(deserializer)?
        .into_iter()
        .map(|v| v.parse::<u64>().map_err(D::Error::custom))
        .collect()
}
