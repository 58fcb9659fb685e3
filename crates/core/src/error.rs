//! Error types for the embed bootstrap.

use thiserror::Error;

/// Result type alias for embed operations.
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Errors that can occur while bootstrapping a comment section.
///
/// Mount and options errors are fatal: initialization refuses to proceed
/// rather than handing the runtime a broken embed. Storage errors are
/// recoverable by contract and only ever reach callers of
/// [`SessionStore::write`](crate::store::SessionStore::write); the session
/// bridge logs and drops them.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The mount selector matched nothing in the host document.
    #[error("no mount node matched selector '{selector}'")]
    MountNotFound { selector: String },

    /// The configuration provided no mount target at all.
    #[error("embed configuration did not provide a mount node")]
    MissingMountTarget,

    /// The configuration object was structurally unusable.
    #[error("invalid embed configuration: {0}")]
    InvalidOptions(String),

    /// The rendering runtime refused to initialize.
    #[error("rendering runtime initialization failed: {0}")]
    Runtime(String),

    /// Durable storage rejected a write (quota, disabled storage).
    #[error("session storage write failed: {0}")]
    StorageWrite(String),

    /// I/O error from a file-backed store.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EmbedError {
    /// True for errors that must abort initialization.
    ///
    /// Storage failures are not fatal: the widget keeps running with
    /// in-memory session state only.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, EmbedError::StorageWrite(_) | EmbedError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_errors_are_fatal() {
        assert!(EmbedError::MissingMountTarget.is_fatal());
        assert!(
            EmbedError::MountNotFound {
                selector: "#comments".into()
            }
            .is_fatal()
        );
    }

    #[test]
    fn storage_write_errors_are_recoverable() {
        assert!(!EmbedError::StorageWrite("quota exceeded".into()).is_fatal());
    }
}
