//! The persisted session value and its storage key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Durable-storage key under which the serialized session lives.
///
/// Compatibility-bearing: sessions written by earlier releases of the embed
/// script are stored under this exact key, so it must never change.
pub const SESSION_STORAGE_KEY: &str = "cactus-session";

/// An opaque session token.
///
/// Meaningful only to the rendering runtime and the persisted-session
/// format; the embed layer moves it between durable storage and the
/// runtime's configuration without interpreting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionValue(Value);

impl SessionValue {
    pub fn new(value: Value) -> Self {
        SessionValue(value)
    }

    /// Parses a stored payload. `None` on malformed data: a corrupt slot
    /// must read as an absent session, never as an error.
    pub fn from_stored(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok().map(SessionValue)
    }

    /// Serializes for storage, in the same format [`from_stored`] reads.
    ///
    /// [`from_stored`]: Self::from_stored
    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for SessionValue {
    fn from(value: Value) -> Self {
        SessionValue(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn stored_format_round_trips() {
        let session = SessionValue::new(json!({ "token": "xyz" }));
        let raw = session.to_stored().unwrap();
        assert_eq!(SessionValue::from_stored(&raw), Some(session));
    }

    #[test]
    fn malformed_payload_reads_as_absent() {
        assert_eq!(SessionValue::from_stored("{not json"), None);
        assert_eq!(SessionValue::from_stored(""), None);
    }

    #[test]
    fn parses_legacy_payload() {
        let session = SessionValue::from_stored(r#"{"token":"xyz"}"#).unwrap();
        assert_eq!(session.as_value(), &json!({ "token": "xyz" }));
    }
}
