//! Datetime serde helpers for storage timestamps.
//!
//! - Serialization: `DateTime<Utc>` -> RFC3339 string
//! - Deserialization: RFC3339 string or Unix seconds -> `DateTime<Utc>`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes `DateTime<Utc>` as an RFC3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

/// Deserializes `DateTime<Utc>` from RFC3339 or a Unix timestamp in seconds.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrSeconds {
        String(String),
        Seconds(i64),
    }

    match StringOrSeconds::deserialize(deserializer)? {
        StringOrSeconds::String(s) => parse_rfc3339(&s)
            .ok_or_else(|| Error::custom(format!("Invalid RFC3339 timestamp: {s}"))),
        StringOrSeconds::Seconds(ts) => {
            DateTime::from_timestamp(ts, 0).ok_or_else(|| Error::custom("Invalid Unix timestamp"))
        }
    }
}

/// Parses an RFC3339 string into UTC; `None` when malformed.
pub fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "crate::utils::datetime")]
        at: DateTime<Utc>,
    }

    #[test]
    fn accepts_rfc3339_and_seconds() {
        let a: Result<Stamped, _> = serde_json::from_str(r#"{"at":"2024-01-02T03:04:05Z"}"#);
        let b: Result<Stamped, _> = serde_json::from_str(r#"{"at":1704164645}"#);
        assert!(a.is_ok() && b.is_ok());
        let (Ok(a), Ok(b)) = (a, b) else {
            return;
        };
        assert_eq!(a.at, b.at);
    }

    #[test]
    fn rejects_garbage() {
        let res: Result<Stamped, _> = serde_json::from_str(r#"{"at":"yesterday"}"#);
        assert!(res.is_err());
    }
}
