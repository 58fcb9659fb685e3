//! The rendering-runtime contract.
//!
//! The runtime that actually renders comments - display, network I/O,
//! moderation UI - is an external collaborator. This layer consumes it
//! through exactly two points: an initialization call and an outbound
//! session-update channel on the returned handle.

use cactus_protocol::{ConfigRecord, SessionValue};

use crate::error::Result;

/// Handler invoked for every session value the runtime emits.
///
/// Deliberately not `Send`: the embed flow is single-threaded and browser
/// hosts run on one thread by construction.
pub type SessionHandler = Box<dyn Fn(SessionValue)>;

/// Handle to a running widget instance.
pub trait RuntimeHandle {
    /// Registers `handler` on the instance's session-update channel.
    ///
    /// The runtime may fire it arbitrarily many times, but never before
    /// `initialize` has returned. The registration is long-lived; there is
    /// no unsubscribe in normal operation.
    fn on_session_update(&self, handler: SessionHandler);
}

/// A rendering runtime that can be handed a mount node and configuration.
pub trait CommentRuntime {
    /// Element reference type, matching the host document's.
    type Node;
    type Handle: RuntimeHandle;

    /// Boots the widget in `node` with `config`. The mount node arrives
    /// separately on purpose: it is not a configuration option.
    fn initialize(&self, node: Self::Node, config: ConfigRecord) -> Result<Self::Handle>;
}
