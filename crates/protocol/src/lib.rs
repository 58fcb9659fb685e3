//! Wire types for the Cactus Comments embed layer.
//!
//! This crate contains the serde-serializable types exchanged between the
//! bootstrap layer and the rendering runtime: the configuration record that
//! parameterizes a comment section and the opaque session value persisted
//! across page loads. These types represent the "protocol layer" - the shapes
//! of data as they cross the embed boundary.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization and
//!   attribute-name mapping
//! - **Runtime-opaque**: option semantics belong to the rendering runtime;
//!   the embed layer only names the recognized fields and forwards the rest
//! - **Stable**: the storage key and serialized session format are
//!   compatibility-bearing and must not change
//!
//! The bootstrap logic itself lives in `cactus-embed`.

pub mod config;
pub mod session;

pub use config::{ACTIVATION_FIELD, ConfigRecord, ConfigValue, dataset_name};
pub use session::{SESSION_STORAGE_KEY, SessionValue};
