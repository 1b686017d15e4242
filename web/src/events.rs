//! DOM event wiring for bound forms.
//!
//! Every listener owns a clone of the shared cache and forwards its event by
//! `BindingId`. Listeners live as long as the page, so their closures are
//! leaked with `forget`.

use std::cell::RefCell;
use std::rc::Rc;

use formcache::{BindingId, FormCache, Lifecycle};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, Window};

use crate::WebError;
use crate::dom::DomForm;
use crate::storage::{LocalStorage, describe};

pub(crate) type SharedCache = Rc<RefCell<FormCache<LocalStorage, DomForm>>>;

/// Page event that stands in for "unload". Fires on navigation and on
/// bfcache entry, where `unload` would not.
const UNLOAD_EVENT: &str = "pagehide";

/// Forward one event, skipping it if the cache is already mid-update (a
/// change listener re-entering us, for instance).
pub(crate) fn dispatch(cache: &SharedCache, id: BindingId, event: Lifecycle) {
    match cache.try_borrow_mut() {
        Ok(mut cache) => cache.dispatch(id, event),
        Err(_) => log::warn!("formcache: {event:?} for {id:?} skipped, cache busy"),
    }
}

/// Attach listeners for every event `bind` asked for except `Ready`, which
/// the caller runs once the document is parsed.
pub(crate) fn attach(
    cache: &SharedCache,
    window: &Window,
    form: &DomForm,
    id: BindingId,
    events: &[Lifecycle],
) -> Result<(), WebError> {
    for &event in events {
        match event {
            Lifecycle::Ready => {}
            Lifecycle::Unload => listen(window, UNLOAD_EVENT, cache, id, event, false)?,
            Lifecycle::Submit => listen(form.root(), "submit", cache, id, event, false)?,
            Lifecycle::Reset => match form.reset_control() {
                Some(control) => listen(&control, "click", cache, id, event, true)?,
                None => log::debug!("formcache: reset control vanished for {id:?}"),
            },
        }
    }
    Ok(())
}

fn listen(
    target: &EventTarget,
    name: &str,
    cache: &SharedCache,
    id: BindingId,
    event: Lifecycle,
    prevent_default: bool,
) -> Result<(), WebError> {
    let cache = Rc::clone(cache);
    let handler = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
        if prevent_default {
            ev.prevent_default();
        }
        dispatch(&cache, id, event);
    });
    target
        .add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())
        .map_err(|e| WebError::Dom(describe(&e)))?;
    handler.forget();
    Ok(())
}

/// Run `f` once the document is parsed: now if it already is, otherwise on
/// `DOMContentLoaded`.
pub(crate) fn when_ready<F>(document: &web_sys::Document, f: F) -> Result<(), WebError>
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let handler = Closure::<dyn FnMut(Event)>::once(move |_: Event| f());
    document
        .add_event_listener_with_callback("DOMContentLoaded", handler.as_ref().unchecked_ref())
        .map_err(|e| WebError::Dom(describe(&e)))?;
    handler.forget();
    Ok(())
}
