//! Browser bindings for the Cactus Comments embed layer.
//!
//! Compiled to wasm, this crate wires the `cactus-embed` bootstrap to the
//! real page: the DOM as the host document, `localStorage` as the durable
//! store, and a host-supplied JS initializer as the rendering runtime. Off
//! wasm32 the crate is empty; everything testable lives in `cactus-embed`.
//!
//! Host pages call `initComments({ node, ... }, init)` for explicit
//! embedding, or `initCommentsFromDocument(init)` to activate from the
//! current script tag's `data-*` attributes.

#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Storage};

use cactus_embed::{
    CommentRuntime, EmbedError, EmbedOptions, HostDocument, Marker, MountTarget, RuntimeHandle,
    SessionHandler, SessionStore,
};
use cactus_protocol::{ConfigRecord, SessionValue};

/// Name of the handle property carrying the session-update channel.
const SESSION_PORT: &str = "onSessionUpdate";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Explicit activation: boots a comment section from a configuration
/// object. `config.node` is an element reference or a selector string;
/// `init` is the rendering runtime's initializer, called as
/// `init(node, config)` and expected to return an instance handle exposing
/// `onSessionUpdate(callback)`.
#[wasm_bindgen(js_name = initComments)]
pub fn init_comments(config: JsValue, init: Function) -> Result<(), JsValue> {
    let document = WebDocument::from_page()?;
    let options = split_options(config)?;
    cactus_embed::init_comments(&document, LocalStorageStore::from_page(), &JsRuntime { init }, options)
        .map(drop)
        .map_err(to_js)
}

/// Declarative activation: boots from the current script tag when it
/// carries `data-default-homeserver-url`. Returns whether a section was
/// mounted.
#[wasm_bindgen(js_name = initCommentsFromDocument)]
pub fn init_comments_from_document(init: Function) -> Result<bool, JsValue> {
    let document = WebDocument::from_page()?;
    cactus_embed::init_from_document(&document, LocalStorageStore::from_page(), &JsRuntime { init })
        .map(|embed| embed.is_some())
        .map_err(to_js)
}

fn to_js(err: EmbedError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Splits the historical configuration shape: `node` becomes the mount
/// target, the rest is typed into the forwarded record.
fn split_options(config: JsValue) -> Result<EmbedOptions<Element>, JsValue> {
    let object: Object = config
        .dyn_into()
        .map_err(|_| to_js(EmbedError::InvalidOptions("configuration must be an object".into())))?;

    let node = Reflect::get(&object, &JsValue::from_str("node"))?;
    let target = match node.dyn_into::<Element>() {
        Ok(element) => MountTarget::Node(element),
        Err(other) => match other.as_string() {
            Some(selector) => MountTarget::Selector(selector),
            None => return Err(to_js(EmbedError::MissingMountTarget)),
        },
    };

    // Work on a shallow copy so the caller's object keeps its node key.
    let copy = Object::assign(&Object::new(), &object);
    Reflect::delete_property(&copy, &JsValue::from_str("node"))?;
    let record: ConfigRecord = serde_wasm_bindgen::from_value(copy.into())
        .map_err(|err| to_js(EmbedError::InvalidOptions(err.to_string())))?;

    Ok(EmbedOptions::new(target, record))
}

/// The page's DOM as the host document.
struct WebDocument {
    document: Document,
}

impl WebDocument {
    fn from_page() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document in this context"))?;
        Ok(Self { document })
    }
}

impl HostDocument for WebDocument {
    type Node = Element;

    fn query_selector(&self, selector: &str) -> Option<Element> {
        // An unparseable selector throws in the browser; treat it as no
        // match and let the resolver fail with the selector in hand.
        self.document.query_selector(selector).ok().flatten()
    }

    fn marker(&self) -> Option<Marker<Element>> {
        let script = self.document.current_script()?;
        let node: Element = script.into();
        let attributes = data_attributes(&node);
        Some(Marker { node, attributes })
    }
}

/// Collects `data-*` attributes as (suffix, value) pairs.
fn data_attributes(element: &Element) -> Vec<(String, String)> {
    let map = element.attributes();
    let mut out = Vec::new();
    for index in 0..map.length() {
        if let Some(attr) = map.item(index) {
            if let Some(name) = attr.name().strip_prefix("data-") {
                out.push((name.to_owned(), attr.value()));
            }
        }
    }
    out
}

/// `localStorage` as the durable store.
///
/// Storage can be absent (sandboxed frames, privacy settings). Reads then
/// see no session and writes fail recoverably - the widget still mounts.
struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    fn from_page() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }
}

impl SessionStore for LocalStorageStore {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> cactus_embed::Result<()> {
        let Some(storage) = self.storage.as_ref() else {
            return Err(EmbedError::StorageWrite("storage unavailable".into()));
        };
        storage
            .set_item(key, value)
            .map_err(|err| EmbedError::StorageWrite(format!("{err:?}")))
    }
}

/// A JS rendering runtime behind an initializer function.
struct JsRuntime {
    init: Function,
}

impl CommentRuntime for JsRuntime {
    type Node = Element;
    type Handle = JsHandle;

    fn initialize(&self, node: Element, config: ConfigRecord) -> cactus_embed::Result<JsHandle> {
        let config = serde_wasm_bindgen::to_value(&config)
            .map_err(|err| EmbedError::Runtime(err.to_string()))?;
        let handle = self
            .init
            .call2(&JsValue::NULL, &node.into(), &config)
            .map_err(|err| EmbedError::Runtime(format!("{err:?}")))?;
        Ok(JsHandle { handle })
    }
}

/// Handle returned by the JS initializer.
struct JsHandle {
    handle: JsValue,
}

impl RuntimeHandle for JsHandle {
    fn on_session_update(&self, handler: SessionHandler) {
        let port = match Reflect::get(&self.handle, &JsValue::from_str(SESSION_PORT))
            .ok()
            .and_then(|port| port.dyn_into::<Function>().ok())
        {
            Some(port) => port,
            None => {
                warn("runtime handle has no onSessionUpdate channel; sessions will not persist");
                return;
            }
        };

        let callback = Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
            match serde_wasm_bindgen::from_value::<serde_json::Value>(value) {
                Ok(value) => handler(SessionValue::new(value)),
                Err(_) => warn("discarding non-serializable session update"),
            }
        });
        if port.call1(&self.handle, callback.as_ref()).is_err() {
            warn("failed to subscribe to session updates");
        }
        // The subscription is never cancelled; the closure lives as long as
        // the page does.
        callback.forget();
    }
}
