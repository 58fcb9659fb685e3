//! The bootstrap sequence.
//!
//! This module performs the one-time handoff that turns a configuration and
//! a host document into a running widget:
//!
//! 1. Resolve the mount target to exactly one host element
//! 2. Load the persisted session from durable storage
//! 3. Inject it into the configuration record
//! 4. Initialize the rendering runtime with the node and the final record
//! 5. Subscribe the session bridge to the runtime's update channel
//!
//! The sequence is synchronous and strictly ordered: the storage read
//! precedes initialization, which precedes any possible update callback.

use crate::bridge::{SessionBridge, inject_session};
use crate::document::HostDocument;
use crate::error::Result;
use crate::resolver::{EmbedOptions, declarative_options, resolve_mount};
use crate::runtime::{CommentRuntime, RuntimeHandle};
use crate::store::SessionStore;

/// A live comment section.
///
/// Owns the runtime handle and the session bridge; dropping it is the only
/// form of teardown - the update subscription has no explicit cancel.
#[derive(Debug)]
pub struct CommentEmbed<S, H> {
    bridge: SessionBridge<S>,
    handle: H,
}

impl<S: SessionStore + 'static, H: RuntimeHandle> CommentEmbed<S, H> {
    /// The rendering runtime's instance handle.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Re-reads the currently persisted session. Mainly useful to hosts
    /// that want to inspect what survived the last update.
    pub fn stored_session(&self) -> Option<cactus_protocol::SessionValue> {
        self.bridge.load_session()
    }
}

/// Boots one comment section.
///
/// Fatal errors (no resolvable mount node, runtime refusal) surface as
/// `Err` and nothing is mounted; storage problems do not fail the call.
pub fn init_comments<D, S, R>(
    document: &D,
    store: S,
    runtime: &R,
    options: EmbedOptions<D::Node>,
) -> Result<CommentEmbed<S, R::Handle>>
where
    D: HostDocument,
    S: SessionStore + 'static,
    R: CommentRuntime<Node = D::Node>,
{
    let EmbedOptions { target, mut config } = options;

    let node = resolve_mount(document, target)?;

    let bridge = SessionBridge::new(store);
    let session = bridge.load_session();
    tracing::debug!(restored = session.is_some(), "loaded stored session");
    inject_session(&mut config, session);

    let handle = runtime.initialize(node, config)?;
    bridge.subscribe_updates(&handle);
    tracing::debug!("comment section initialized");

    Ok(CommentEmbed { bridge, handle })
}

/// Declarative activation: boots from the document's marker element when it
/// carries the activation attribute.
///
/// `Ok(None)` when the document has no marker or the marker is not
/// activated - an un-opted-in page is not an error. Everything after
/// activation behaves exactly like [`init_comments`].
pub fn init_from_document<D, S, R>(
    document: &D,
    store: S,
    runtime: &R,
) -> Result<Option<CommentEmbed<S, R::Handle>>>
where
    D: HostDocument,
    S: SessionStore + 'static,
    R: CommentRuntime<Node = D::Node>,
{
    let Some(marker) = document.marker() else {
        return Ok(None);
    };
    let Some(options) = declarative_options(marker) else {
        tracing::debug!("marker present but not activated, skipping declarative embed");
        return Ok(None);
    };
    init_comments(document, store, runtime, options).map(Some)
}
