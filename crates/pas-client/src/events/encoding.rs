//! Serde helpers for envelope fields.
//!
//! Byte fields are base64, matching how the producers serialize `[]byte`
//! into JSON: standard alphabet with padding, `null` for no bytes.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

fn decode<E: serde::de::Error>(raw: &str) -> Result<Vec<u8>, E> {
    STANDARD
        .decode(raw)
        .map_err(|error| E::custom(format!("invalid base64 payload: {error}")))
}

pub mod bytes {
    use super::{Deserialize, Deserializer, STANDARD, Serializer, decode};
    use base64::Engine as _;

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_empty() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(&STANDARD.encode(value))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }
}

pub mod bytes_list {
    use serde::ser::SerializeSeq;

    use super::{Deserialize, Deserializer, STANDARD, Serializer, decode};
    use base64::Engine as _;

    pub fn serialize<S: Serializer>(value: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(value.len()))?;
        for item in value {
            seq.serialize_element(&STANDARD.encode(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        Option::<Vec<Option<String>>>::deserialize(deserializer)?
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.map_or_else(|| Ok(Vec::new()), |raw| decode(&raw)))
            .collect()
    }
}

/// Reads epoch milliseconds from a number, a numeric string or an RFC 3339
/// string. Anything else, `null` included, is 0.
pub fn lenient_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let millis = match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value as i64))
            .unwrap_or_default(),
        Value::String(raw) => {
            let raw = raw.trim();
            raw.parse::<i64>()
                .ok()
                .or_else(|| {
                    DateTime::parse_from_rfc3339(raw)
                        .ok()
                        .map(|timestamp| timestamp.timestamp_millis())
                })
                .unwrap_or_default()
        }
        _ => 0,
    };
    Ok(millis)
}
