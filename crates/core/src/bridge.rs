//! The session bridge: one round trip between durable storage and the
//! rendering runtime's session-update channel.
//!
//! Read once at bootstrap, rewrite on every update, fixed key, last write
//! wins. Read failures read as an absent session; write failures are logged
//! and dropped so no storage problem ever crosses the channel boundary.

use std::rc::Rc;

use cactus_protocol::{ConfigRecord, SESSION_STORAGE_KEY, SessionValue};

use crate::runtime::RuntimeHandle;
use crate::store::SessionStore;

/// Sets the stored session on a configuration record. Pure; `None` encodes
/// "no prior session" and serializes as `null` for the runtime.
pub fn inject_session(config: &mut ConfigRecord, session: Option<SessionValue>) {
    config.stored_session = session;
}

/// Owns the store half of the session protocol for one embed instance.
#[derive(Debug)]
pub struct SessionBridge<S> {
    store: Rc<S>,
}

impl<S: SessionStore + 'static> SessionBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store: Rc::new(store) }
    }

    /// Reads the persisted session from the fixed storage key.
    ///
    /// Absent slot reads as `None`; so does a malformed one - durable
    /// storage corruption must never block widget initialization.
    pub fn load_session(&self) -> Option<SessionValue> {
        let raw = self.store.read(SESSION_STORAGE_KEY)?;
        let session = SessionValue::from_stored(&raw);
        if session.is_none() {
            tracing::debug!("discarding malformed stored session");
        }
        session
    }

    /// Persists every session value `handle` emits, overwriting the slot
    /// unconditionally.
    ///
    /// The subscription lives as long as the widget instance; a write
    /// failure drops that one update and the widget carries on with its
    /// in-memory session only.
    pub fn subscribe_updates<H: RuntimeHandle>(&self, handle: &H) {
        let store = Rc::clone(&self.store);
        handle.on_session_update(Box::new(move |session| {
            persist_update(store.as_ref(), &session);
        }));
    }
}

fn persist_update<S: SessionStore>(store: &S, session: &SessionValue) {
    let serialized = match session.to_stored() {
        Ok(serialized) => serialized,
        Err(err) => {
            tracing::warn!(error = %err, "session update not serializable, dropping");
            return;
        }
    };
    match store.write(SESSION_STORAGE_KEY, &serialized) {
        Ok(()) => tracing::debug!("persisted session update"),
        Err(err) => tracing::warn!(error = %err, "failed to persist session update, dropping"),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use crate::error::{EmbedError, Result};
    use crate::runtime::SessionHandler;
    use crate::store::MemoryStore;

    use super::*;

    /// Handle double that hands emitted values straight to the registered
    /// handler.
    #[derive(Default)]
    struct FakeHandle {
        handlers: RefCell<Vec<SessionHandler>>,
    }

    impl FakeHandle {
        fn emit(&self, session: SessionValue) {
            for handler in self.handlers.borrow().iter() {
                handler(session.clone());
            }
        }
    }

    impl RuntimeHandle for FakeHandle {
        fn on_session_update(&self, handler: SessionHandler) {
            self.handlers.borrow_mut().push(handler);
        }
    }

    struct FailingStore;

    impl SessionStore for FailingStore {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }

        fn write(&self, _key: &str, _value: &str) -> Result<()> {
            Err(EmbedError::StorageWrite("storage disabled".into()))
        }
    }

    #[test]
    fn load_session_empty_store_is_none() {
        let bridge = SessionBridge::new(MemoryStore::new());
        assert_eq!(bridge.load_session(), None);
    }

    #[test]
    fn load_session_malformed_is_none() {
        let store = MemoryStore::new();
        store.write(SESSION_STORAGE_KEY, "{not json").unwrap();

        let bridge = SessionBridge::new(store);
        assert_eq!(bridge.load_session(), None);
    }

    #[test]
    fn load_session_round_trips_stored_value() {
        let store = MemoryStore::new();
        store.write(SESSION_STORAGE_KEY, r#"{"token":"xyz"}"#).unwrap();

        let bridge = SessionBridge::new(store);
        let session = bridge.load_session().unwrap();
        assert_eq!(session.as_value(), &json!({ "token": "xyz" }));
    }

    #[test]
    fn inject_session_sets_stored_session() {
        let mut config = ConfigRecord::default();

        inject_session(&mut config, Some(SessionValue::new(json!("s"))));
        assert_eq!(config.stored_session, Some(SessionValue::new(json!("s"))));

        inject_session(&mut config, None);
        assert_eq!(config.stored_session, None);
    }

    #[test]
    fn updates_overwrite_with_last_value() {
        let bridge = SessionBridge::new(MemoryStore::new());
        let handle = FakeHandle::default();
        bridge.subscribe_updates(&handle);

        handle.emit(SessionValue::new(json!({ "token": "v1" })));
        handle.emit(SessionValue::new(json!({ "token": "v2" })));
        handle.emit(SessionValue::new(json!({ "token": "v3" })));

        let session = bridge.load_session().unwrap();
        assert_eq!(session.as_value(), &json!({ "token": "v3" }));
    }

    #[test]
    fn write_failure_does_not_panic_handler() {
        let bridge = SessionBridge::new(FailingStore);
        let handle = FakeHandle::default();
        bridge.subscribe_updates(&handle);

        handle.emit(SessionValue::new(json!({ "token": "v1" })));
        assert_eq!(bridge.load_session(), None);
    }
}
