//! The config resolver: turns caller input or marker attributes into a
//! configuration record plus a resolved mount node.

use serde_json::Value;

use cactus_protocol::{ConfigRecord, dataset_name};

use crate::document::{HostDocument, Marker};
use crate::error::{EmbedError, Result};

/// Where the widget mounts: a host element reference, or a selector to
/// resolve against the host document.
#[derive(Debug, Clone)]
pub enum MountTarget<N> {
    Node(N),
    Selector(String),
}

/// Resolved-before-handoff embed input: the mount target plus the record
/// forwarded to the rendering runtime.
///
/// Keeping the target outside [`ConfigRecord`] guarantees the runtime never
/// sees a `node` option, whichever entry point built the configuration.
#[derive(Debug, Clone)]
pub struct EmbedOptions<N> {
    pub target: MountTarget<N>,
    pub config: ConfigRecord,
}

impl<N> EmbedOptions<N> {
    pub fn new(target: MountTarget<N>, config: ConfigRecord) -> Self {
        Self { target, config }
    }

    /// Convenience for the common selector-plus-config shape.
    pub fn selector(selector: impl Into<String>, config: ConfigRecord) -> Self {
        Self::new(MountTarget::Selector(selector.into()), config)
    }

    /// Splits a JSON configuration object of the embed script's historical
    /// shape: a `node` key carrying a selector string, everything else a
    /// widget option. The `node` key is removed before the record is typed,
    /// so it cannot leak through the extension bucket.
    ///
    /// A missing `node` is a fatal configuration error: initialization must
    /// never silently proceed without a mount target.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(EmbedError::InvalidOptions("configuration must be a JSON object".into()));
        };
        let target = match fields.remove("node") {
            Some(Value::String(selector)) => MountTarget::Selector(selector),
            Some(_) => {
                return Err(EmbedError::InvalidOptions(
                    "'node' must be a selector string in JSON configuration".into(),
                ));
            }
            None => return Err(EmbedError::MissingMountTarget),
        };
        let config: ConfigRecord = serde_json::from_value(Value::Object(fields))?;
        Ok(Self { target, config })
    }
}

/// Resolves the mount target against the host document.
///
/// Selector policy: **first match in document order**, the behavior of a
/// single-element query. Zero matches is fatal; initialization does not
/// proceed with a null node.
pub fn resolve_mount<D: HostDocument>(document: &D, target: MountTarget<D::Node>) -> Result<D::Node> {
    match target {
        MountTarget::Node(node) => Ok(node),
        MountTarget::Selector(selector) => {
            tracing::debug!(selector = %selector, "resolving mount selector");
            document
                .query_selector(&selector)
                .ok_or(EmbedError::MountNotFound { selector })
        }
    }
}

/// Builds embed options from a marker element, if the marker activates the
/// declarative path.
///
/// Activation condition: the marker carries the default-homeserver-url data
/// attribute. Every data attribute is copied into the record under its
/// dataset name (values stay literal strings); the marker element itself is
/// the mount target. Returns `None` for markers without the activation
/// attribute - presence of a marker alone does not opt a page in.
pub fn declarative_options<N>(marker: Marker<N>) -> Option<EmbedOptions<N>> {
    let activated = marker
        .attributes
        .iter()
        .any(|(name, _)| dataset_name(name) == cactus_protocol::ACTIVATION_FIELD);
    if !activated {
        return None;
    }
    let config = ConfigRecord::from_attributes(marker.attributes);
    Some(EmbedOptions::new(MountTarget::Node(marker.node), config))
}
