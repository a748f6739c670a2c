use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HEADER_ID: &str = "webhook-id";
pub const HEADER_TIMESTAMP: &str = "webhook-timestamp";
pub const HEADER_SIGNATURE: &str = "webhook-signature";

/// Sender-assigned identifier, unique per delivery attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct WebhookId(String);

impl WebhookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WebhookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix seconds as sent in the `Webhook-Timestamp` header. Kept as text so the
/// signed bytes are reproduced exactly as received.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct WebhookTimestamp(String);

impl WebhookTimestamp {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn unix_seconds(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        self.unix_seconds()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

impl fmt::Display for WebhookTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw request body. Must be the bytes off the wire, never a re-serialized copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WebhookPayload(Vec<u8>);

impl WebhookPayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for WebhookPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for WebhookPayload {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WebhookHeaders {
    #[serde(rename = "webhook-id")]
    pub id: WebhookId,
    #[serde(rename = "webhook-timestamp")]
    pub timestamp: WebhookTimestamp,
    #[serde(rename = "webhook-signature")]
    pub signature: String,
}

impl WebhookHeaders {
    /// Picks the three Standard Webhooks headers out of arbitrary (name, value)
    /// pairs. Names compare case-insensitively, as HTTP header names do.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut id = None;
        let mut timestamp = None;
        let mut signature = None;

        for (name, value) in pairs {
            let name = name.as_ref();
            if name.eq_ignore_ascii_case(HEADER_ID) {
                id = Some(value.into());
            } else if name.eq_ignore_ascii_case(HEADER_TIMESTAMP) {
                timestamp = Some(value.into());
            } else if name.eq_ignore_ascii_case(HEADER_SIGNATURE) {
                signature = Some(value.into());
            }
        }

        Ok(Self {
            id: WebhookId::new(id.ok_or(AppError::MissingHeader(HEADER_ID))?),
            timestamp: WebhookTimestamp::new(
                timestamp.ok_or(AppError::MissingHeader(HEADER_TIMESTAMP))?,
            ),
            signature: signature.ok_or(AppError::MissingHeader(HEADER_SIGNATURE))?,
        })
    }

    /// Parses a JSON object of header names to values, such as a dump of the
    /// request headers. Unrelated headers are ignored.
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
        let mut pairs = Vec::with_capacity(map.len());
        for (name, value) in map {
            let value = value.as_str().map(String::from).ok_or_else(|| {
                AppError::InvalidInput(format!("Header '{}' must be a JSON string.", name))
            })?;
            pairs.push((name, value));
        }
        Self::from_pairs(pairs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookDelivery {
    pub headers: WebhookHeaders,
    pub payload: WebhookPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_parses_unix_seconds() {
        let ts = WebhookTimestamp::new("1752855494");
        assert_eq!(ts.unix_seconds(), Some(1_752_855_494));
        assert_eq!(
            ts.to_datetime().map(|dt| dt.to_rfc3339()),
            Some("2025-07-18T16:18:14+00:00".to_string())
        );
    }

    #[test]
    fn non_numeric_timestamp_has_no_datetime() {
        let ts = WebhookTimestamp::new("yesterday");
        assert_eq!(ts.unix_seconds(), None);
        assert!(ts.to_datetime().is_none());
    }

    #[test]
    fn headers_from_pairs_ignore_case_and_extras() {
        let headers = WebhookHeaders::from_pairs([
            ("Content-Type", "application/json"),
            ("Webhook-Id", "msg_1"),
            ("WEBHOOK-TIMESTAMP", "1700000000"),
            ("webhook-signature", "v1a,AAAA"),
        ])
        .unwrap();

        assert_eq!(headers.id.as_str(), "msg_1");
        assert_eq!(headers.timestamp.as_str(), "1700000000");
        assert_eq!(headers.signature, "v1a,AAAA");
    }

    #[test]
    fn headers_from_pairs_reports_missing_header() {
        let err = WebhookHeaders::from_pairs([("webhook-id", "msg_1"), ("webhook-timestamp", "1")])
            .unwrap_err();
        assert!(matches!(err, AppError::MissingHeader(HEADER_SIGNATURE)));
    }

    #[test]
    fn headers_from_json_rejects_non_string_values() {
        let err = WebhookHeaders::from_json(
            r#"{"webhook-id":"msg_1","webhook-timestamp":1700000000,"webhook-signature":"v1a,AAAA"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn headers_from_json() {
        let headers = WebhookHeaders::from_json(
            r#"{"Webhook-Id":"msg_1","Webhook-Timestamp":"1700000000","Webhook-Signature":"v1a,AAAA","user-agent":"x"}"#,
        )
        .unwrap();
        assert_eq!(headers.id, WebhookId::new("msg_1"));
    }
}
