//! The configuration record handed to the rendering runtime.
//!
//! A comment section is configured either programmatically or through
//! `data-*` attributes on the marker element that loaded the widget. Both
//! paths produce a [`ConfigRecord`]: recognized widget options live in named
//! fields, anything else rides along in a flattened extension bucket so
//! host pages can feed runtime options this layer has never heard of without
//! those keys leaking into the typed surface.
//!
//! The mount node is deliberately *not* part of the record. The runtime
//! receives the resolved element separately, so a `node` key can never be
//! forwarded as a widget option.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::SessionValue;

/// Dataset name of the attribute whose presence activates declarative
/// embedding, e.g. `<script data-default-homeserver-url="...">`.
pub const ACTIVATION_FIELD: &str = "defaultHomeserverUrl";

/// A scalar option value.
///
/// Declarative attributes always carry strings; programmatic configuration
/// may use the natural type. Both serialize untagged, so `"10"` and `10`
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Bool(bool),
    Number(serde_json::Number),
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_owned())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<u32> for ConfigValue {
    fn from(value: u32) -> Self {
        ConfigValue::Number(value.into())
    }
}

/// Configuration for one comment section.
///
/// Consumed entirely by the rendering runtime; the embed layer reads nothing
/// from it except `stored_session`, which the session bridge injects before
/// handoff. Serializes camelCase to match the runtime's expected flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    /// Homeserver used for guest registration and the activation signal for
    /// declarative embeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_homeserver_url: Option<String>,

    /// Server name of the site's comment rooms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,

    /// Site identifier registered with the comment backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    /// Per-page comment section identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_section_id: Option<String>,

    /// Explicit room to load instead of a derived section room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,

    /// Comments fetched per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<ConfigValue>,

    /// Poll interval for new comments, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<ConfigValue>,

    /// Whether the login form is offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_enabled: Option<ConfigValue>,

    /// Whether unauthenticated guest posting is offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_posting_enabled: Option<ConfigValue>,

    /// Session restored from durable storage. Injected by the session
    /// bridge; always serialized (as `null` when absent) so the runtime can
    /// rely on the field being present.
    #[serde(default)]
    pub stored_session: Option<SessionValue>,

    /// Unrecognized options, forwarded verbatim under their dataset names.
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl ConfigRecord {
    /// Builds a record from a marker element's `data-*` attribute set.
    ///
    /// Names are converted per [`dataset_name`], so `default-homeserver-url`
    /// and `defaultHomeserverUrl` address the same field. Every value stays
    /// the attribute's literal string. A `node` attribute is ignored: the
    /// mount target is resolved separately and never travels in the record.
    pub fn from_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = ConfigRecord::default();
        for (name, value) in attributes {
            record.set_attribute(name.as_ref(), value.into());
        }
        record
    }

    /// Assigns one declarative attribute. Returns `false` when the name was
    /// dropped (currently only `node`).
    pub fn set_attribute(&mut self, name: &str, value: String) -> bool {
        match dataset_name(name).as_str() {
            "node" => return false,
            "defaultHomeserverUrl" => self.default_homeserver_url = Some(value),
            "serverName" => self.server_name = Some(value),
            "siteName" => self.site_name = Some(value),
            "commentSectionId" => self.comment_section_id = Some(value),
            "roomId" => self.room_id = Some(value),
            "pageSize" => self.page_size = Some(ConfigValue::String(value)),
            "updateInterval" => self.update_interval = Some(ConfigValue::String(value)),
            "loginEnabled" => self.login_enabled = Some(ConfigValue::String(value)),
            "guestPostingEnabled" => self.guest_posting_enabled = Some(ConfigValue::String(value)),
            other => {
                self.extensions.insert(other.to_owned(), Value::String(value));
            }
        }
        true
    }

    /// True when the activation field carries a value, i.e. the record came
    /// from (or could drive) a declarative embed.
    pub fn is_activated(&self) -> bool {
        self.default_homeserver_url.is_some()
    }
}

/// Converts an attribute name to its dataset form.
///
/// Mirrors the browser's `dataset` mapping: an optional `data-` prefix is
/// stripped and each `-x` pair becomes `X`. Names without dashes pass
/// through unchanged, so already-camelCased dataset keys are stable under
/// repeated conversion.
pub fn dataset_name(attribute: &str) -> String {
    let stripped = attribute.strip_prefix("data-").unwrap_or(attribute);
    let mut out = String::with_capacity(stripped.len());
    let mut upper_next = false;
    for ch in stripped.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dataset_name_strips_prefix_and_camelizes() {
        assert_eq!(dataset_name("data-default-homeserver-url"), "defaultHomeserverUrl");
        assert_eq!(dataset_name("default-homeserver-url"), "defaultHomeserverUrl");
        assert_eq!(dataset_name("room-id"), "roomId");
        assert_eq!(dataset_name("siteName"), "siteName");
        assert_eq!(dataset_name("x"), "x");
    }

    #[test]
    fn from_attributes_maps_recognized_fields() {
        let record = ConfigRecord::from_attributes([
            ("default-homeserver-url", "https://example.org"),
            ("room-id", "!abc:example.org"),
        ]);

        assert_eq!(record.default_homeserver_url.as_deref(), Some("https://example.org"));
        assert_eq!(record.room_id.as_deref(), Some("!abc:example.org"));
        assert!(record.extensions.is_empty());
        assert!(record.is_activated());
    }

    #[test]
    fn from_attributes_routes_unknown_names_to_extensions() {
        let record = ConfigRecord::from_attributes([("data-theme-color", "green")]);

        assert_eq!(record.extensions.get("themeColor"), Some(&json!("green")));
    }

    #[test]
    fn from_attributes_drops_node() {
        let mut record = ConfigRecord::default();
        assert!(!record.set_attribute("node", "#comments".to_owned()));
        assert_eq!(record, ConfigRecord::default());
    }

    #[test]
    fn serializes_camel_case_with_null_session() {
        let record = ConfigRecord::from_attributes([
            ("default-homeserver-url", "https://example.org"),
            ("page-size", "10"),
        ]);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "defaultHomeserverUrl": "https://example.org",
                "pageSize": "10",
                "storedSession": null,
            })
        );
    }

    #[test]
    fn deserializes_typed_and_extension_fields() {
        let record: ConfigRecord = serde_json::from_value(json!({
            "siteName": "blog",
            "pageSize": 10,
            "loginEnabled": false,
            "theme": { "dark": true },
        }))
        .unwrap();

        assert_eq!(record.site_name.as_deref(), Some("blog"));
        assert_eq!(record.page_size, Some(ConfigValue::from(10u32)));
        assert_eq!(record.login_enabled, Some(ConfigValue::Bool(false)));
        assert_eq!(record.extensions.get("theme"), Some(&json!({ "dark": true })));
        assert_eq!(record.stored_session, None);
    }
}
