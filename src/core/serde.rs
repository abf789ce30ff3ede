use serde::{Serialize, Deserialize, Serializer, Deserializer};

use crate::time::{compute_epoch, interpret_epoch};
use super::CalendarTime;

/// Serializes an epoch counter value as an ISO-8601 UTC string
pub fn serialize_epoch<S>(epoch: &u32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let calendar = interpret_epoch(*epoch)
        .map_err(<S::Error as serde::ser::Error>::custom)?;
    calendar.iso8601().serialize(serializer)
}

/// Deserializes an epoch counter value from an ISO-8601 UTC string
pub fn deserialize_epoch<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_epoch::<D>(&text)
}

/// Serializes an optional epoch as an ISO-8601 string or null
pub fn serialize_opt_epoch<S>(epoch: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match epoch {
        Some(epoch) => {
            let calendar = interpret_epoch(*epoch)
                .map_err(<S::Error as serde::ser::Error>::custom)?;
            serializer.serialize_some(&calendar.iso8601())
        }
        None => serializer.serialize_none(),
    }
}

/// Deserializes an optional epoch from an ISO-8601 string or null
pub fn deserialize_opt_epoch<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) => parse_epoch::<D>(&text).map(Some),
        None => Ok(None),
    }
}

fn parse_epoch<'de, D>(text: &str) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let calendar: CalendarTime = text
        .parse()
        .map_err(<D::Error as serde::de::Error>::custom)?;
    compute_epoch(&calendar).map_err(<D::Error as serde::de::Error>::custom)
}
