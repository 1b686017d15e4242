//! `window.localStorage` as a [`formcache::Storage`] backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browsers can refuse storage outright (privacy modes, sandboxed frames) or
//! throw on individual writes (quota). The first case yields no backend at
//! all; the second surfaces as `StoreError::Backend` for the core to absorb.

use formcache::{Storage, StoreError};
use wasm_bindgen::JsValue;

/// Handle to the page's `localStorage`.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// The window's `localStorage`, or `None` when the browser denies it.
    pub fn from_window(window: &web_sys::Window) -> Option<Self> {
        match window.local_storage() {
            Ok(Some(inner)) => Some(Self { inner }),
            Ok(None) => None,
            Err(e) => {
                log::warn!("formcache: localStorage unavailable: {}", describe(&e));
                None
            }
        }
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get_item(key).map_err(backend_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set_item(key, value).map_err(backend_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.remove_item(key).map_err(backend_error)
    }
}

fn backend_error(err: JsValue) -> StoreError {
    StoreError::Backend(describe(&err))
}

/// Readable text for a thrown JS value (`DOMException` message when present).
pub(crate) fn describe(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    match js_sys::Reflect::get(err, &JsValue::from_str("message")) {
        Ok(message) => message.as_string().unwrap_or_else(|| format!("{err:?}")),
        Err(_) => format!("{err:?}"),
    }
}
