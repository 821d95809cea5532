mod attachment;
mod conversation;
mod message;
mod project;
mod request;
mod status;

pub use attachment::{mime_for_path, ImageAttachment};
pub use conversation::*;
pub use message::*;
pub use project::{CreateProjectRequest, Project};
pub use request::{AgentReply, CreateConversationRequest, SendMessageResponse};
pub use status::OllamaStatus;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Helper to deserialize id as either string or integer
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Like [`deserialize_id`] but tolerates `null`.
pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "deserialize_id")] String);

    Option::<Wrapped>::deserialize(deserializer).map(|opt| opt.map(|Wrapped(id)| id))
}

/// Deserialize a timestamp the backend may send as RFC 3339, as an HTTP date
/// (`Tue, 15 Nov 1994 08:12:31 GMT`) or as a naive ISO string.
///
/// Null, non-string and unparseable values become `None`.
pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_timestamp))
}

/// Parse one of the timestamp formats the backend emits.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[derive(Debug, Deserialize)]
    struct Ids {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        parent: Option<String>,
    }

    #[test]
    fn test_deserialize_id_from_integer_and_string() {
        let ids: Ids = serde_json::from_str(r#"{"id": 42, "parent": "7"}"#).unwrap();
        assert_eq!(ids.id, "42");
        assert_eq!(ids.parent, Some("7".to_string()));

        let ids: Ids = serde_json::from_str(r#"{"id": "abc", "parent": null}"#).unwrap();
        assert_eq!(ids.id, "abc");
        assert_eq!(ids.parent, None);

        let ids: Ids = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(ids.parent, None);
    }

    #[derive(Debug, Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "deserialize_timestamp")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_deserialize_timestamp_tolerates_non_strings() {
        let stamped: Stamped = serde_json::from_str(r#"{"at": 1760862600}"#).unwrap();
        assert!(stamped.at.is_none());
        let stamped: Stamped = serde_json::from_str(r#"{"at": {"t": 1}}"#).unwrap();
        assert!(stamped.at.is_none());
        let stamped: Stamped = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(stamped.at.is_none());
        let stamped: Stamped = serde_json::from_str(r#"{"at": "2026-10-19T08:30:00Z"}"#).unwrap();
        assert!(stamped.at.is_some());
    }

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp("2026-10-19T08:30:00Z").unwrap();
        assert_eq!(ts.hour(), 8);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn test_parse_http_date() {
        let ts = parse_timestamp("Mon, 19 Oct 2026 08:30:05 GMT").unwrap();
        assert_eq!(ts.year(), 2026);
        assert_eq!(ts.day(), 19);
        assert_eq!(ts.second(), 5);
    }

    #[test]
    fn test_parse_naive_iso() {
        let ts = parse_timestamp("2026-10-19T08:30:00.123456").unwrap();
        assert_eq!(ts.minute(), 30);
        let ts = parse_timestamp("2026-10-19 08:30:00").unwrap();
        assert_eq!(ts.hour(), 8);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
