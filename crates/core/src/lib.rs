//! cactus-embed: bootstrap and session bridge for the Cactus Comments
//! widget.
//!
//! This crate is the embedding layer only. It assembles a configuration
//! record from caller input or a marker element's declarative attributes,
//! resolves the mount node in the host document, restores the persisted
//! session from durable storage, hands off to the rendering runtime, and
//! persists every session update the runtime emits afterwards. Comment
//! rendering, the network protocol, and all UI belong to the runtime behind
//! the [`CommentRuntime`] contract.
//!
//! # Example
//!
//! ```ignore
//! use cactus_embed::{EmbedOptions, FileStore, init_comments};
//! use cactus_protocol::ConfigRecord;
//!
//! let config = ConfigRecord::from_attributes([
//!     ("default-homeserver-url", "https://matrix.example.org"),
//!     ("comment-section-id", "blog-post-42"),
//! ]);
//! let options = EmbedOptions::selector("#comments", config);
//! let embed = init_comments(&document, FileStore::new(FileStore::default_path()), &runtime, options)?;
//! ```
//!
//! # Shared storage slot
//!
//! Every embed instance reads and writes the session under one fixed key.
//! Multiple instances on one page (or the same page in two tabs) race on
//! that slot; the last writer wins and no coordination is attempted. This
//! is a documented contract, not an accident.

pub mod bridge;
pub mod document;
pub mod embed;
pub mod error;
pub mod resolver;
pub mod runtime;
pub mod store;

pub use bridge::{SessionBridge, inject_session};
pub use document::{HostDocument, Marker};
pub use embed::{CommentEmbed, init_comments, init_from_document};
pub use error::{EmbedError, Result};
pub use resolver::{EmbedOptions, MountTarget, declarative_options, resolve_mount};
pub use runtime::{CommentRuntime, RuntimeHandle, SessionHandler};
pub use store::{FileStore, MemoryStore, SessionStore};

// Re-export the wire types for convenience
pub use cactus_protocol;
