//! Browser bindings for `formcache`, compiled to WebAssembly.
//!
//! The page calls `initFormCache()` once. That installs logging, opens
//! `localStorage`, and (as soon as the document is parsed) binds every
//! element carrying `data-formcache` plus a non-empty `data-formcache-key`:
//!
//! ```html
//! <form data-formcache data-formcache-key="order-1234">
//!   <div data-formcache-notify style="display: none">
//!     Your input was restored. <a href="#" data-formcache-clear>Reset form</a>
//!   </div>
//!   ...
//! </form>
//! ```
//!
//! The namespace can be overridden per page with `data-formcache-prefix` and
//! `data-formcache-index-key` on the `<html>` element.
//!
//! | Module | Role |
//! |--------|------|
//! | [`storage`] | `localStorage` backend |
//! | [`dom`] | DOM form, field and notice wrappers |
//! | `events` | Listener wiring and document-ready handling |

pub mod dom;
mod events;
pub mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use formcache::{ConfigError, FormCache, FormCacheConfig, KeyStore, Lifecycle, MarkupAttributes};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::dom::DomForm;
use crate::events::SharedCache;
use crate::storage::{LocalStorage, describe};

/// Attribute on `<html>` prefixing page-level config names.
const PAGE_CONFIG_ATTR_PREFIX: &str = "data-formcache-";

/// Error raised while setting the cache up.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("no window object")]
    NoWindow,
    #[error("no document object")]
    NoDocument,
    #[error("invalid page config: {0}")]
    Config(#[from] ConfigError),
    #[error("dom error: {0}")]
    Dom(String),
    #[error("form cache is busy")]
    Busy,
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Page-config attribute holding `name`, e.g. `data-formcache-prefix`.
fn page_config_attr(name: &str) -> String {
    format!("{PAGE_CONFIG_ATTR_PREFIX}{name}")
}

fn page_config(document: &Document) -> Result<FormCacheConfig, WebError> {
    let Some(html) = document.document_element() else {
        return Ok(FormCacheConfig::default());
    };
    Ok(FormCacheConfig::from_lookup(|name| html.get_attribute(&page_config_attr(name)))?)
}

fn install_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        // The host page already installed a logger; keep it.
        log::debug!("formcache: keeping existing logger: {e}");
    }
}

/// Handle returned to the page by [`init_form_cache`].
#[wasm_bindgen]
pub struct FormCacheHandle {
    cache: SharedCache,
}

#[wasm_bindgen]
impl FormCacheHandle {
    /// Remove every cached form. Returns how many entries were removed.
    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&self) -> Result<u32, JsValue> {
        let mut cache = self.cache.try_borrow_mut().map_err(|_| WebError::Busy)?;
        match cache.clear_all() {
            Ok(removed) => Ok(u32::try_from(removed).unwrap_or(u32::MAX)),
            Err(e) => Err(js_sys::Error::new(&e.to_string()).into()),
        }
    }

    /// Namespaced keys currently cached, in sorted order.
    pub fn keys(&self) -> Result<js_sys::Array, JsValue> {
        let cache = self.cache.try_borrow().map_err(|_| WebError::Busy)?;
        let index = cache.keys();
        Ok(index.keys().map(JsValue::from_str).collect())
    }

    /// Number of forms bound so far.
    #[wasm_bindgen(js_name = boundForms)]
    pub fn bound_forms(&self) -> u32 {
        match self.cache.try_borrow() {
            Ok(cache) => u32::try_from(cache.len()).unwrap_or(u32::MAX),
            Err(_) => 0,
        }
    }
}

/// Set up form caching for the page.
///
/// Binding happens when the document is parsed, so this is safe to call
/// from a script in `<head>`.
///
/// # Errors
///
/// Fails without a window or document, or when the page config is invalid.
/// A browser refusing `localStorage` is not an error: forms still bind and
/// every cache operation quietly does nothing.
#[wasm_bindgen(js_name = initFormCache)]
pub fn init_form_cache() -> Result<FormCacheHandle, JsValue> {
    install_logging();
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;
    let config = page_config(&document)?;

    let store = match LocalStorage::from_window(&window) {
        Some(storage) => KeyStore::open(storage, config.namespace.clone()),
        None => KeyStore::unavailable(config.namespace.clone()),
    };
    let cache: SharedCache = Rc::new(RefCell::new(FormCache::new(store)));

    let for_page = Rc::clone(&cache);
    let scan_document = document.clone();
    events::when_ready(&document, move || {
        if let Err(e) = bind_page(&for_page, &window, &scan_document, &config.markup) {
            log::warn!("formcache: binding failed: {e}");
        }
    })?;

    Ok(FormCacheHandle { cache })
}

/// Bind every opted-in container, attach its listeners, then restore.
fn bind_page(
    cache: &SharedCache,
    window: &Window,
    document: &Document,
    markup: &MarkupAttributes,
) -> Result<(), WebError> {
    let nodes = document
        .query_selector_all(&markup.opt_in_selector())
        .map_err(|e| WebError::Dom(describe(&e)))?;

    let mut ready = Vec::new();
    for node in (0..nodes.length()).filter_map(|i| nodes.item(i)) {
        let Ok(root) = node.dyn_into::<Element>() else {
            continue;
        };
        let marker = root.get_attribute(&markup.opt_in);
        let key = root.get_attribute(&markup.key);
        let form = DomForm::new(root, markup.clone());

        let registered = cache
            .try_borrow_mut()
            .map_err(|_| WebError::Busy)?
            .register_markup(marker.as_deref(), key.as_deref(), form.clone());
        let Some((id, events)) = registered else {
            log::debug!("formcache: skipping container without a cache key");
            continue;
        };
        events::attach(cache, window, &form, id, &events)?;
        if events.contains(&Lifecycle::Ready) {
            ready.push(id);
        }
    }

    log::debug!("formcache: bound {} forms", ready.len());
    for id in ready {
        events::dispatch(cache, id, Lifecycle::Ready);
    }
    Ok(())
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

#[cfg(all(test, target_arch = "wasm32"))]
#[path = "browser_test.rs"]
mod browser_tests;
