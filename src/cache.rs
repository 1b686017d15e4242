//! Page-wide registry: one [`KeyStore`] plus every bound form.
//!
//! DESIGN
//! ======
//! There is no ambient global state. The host builds one `FormCache` at
//! startup, registers each opted-in form explicitly, and routes lifecycle
//! events to it by [`BindingId`]. The store is shared by all bindings, so
//! bulk clear and the key listing see every form on the page.

use crate::binding::{CacheKey, FormBinding, Lifecycle};
use crate::config::is_opted_in;
use crate::field::FormSurface;
use crate::store::{KeyIndex, KeyStore, Storage, StoreError};

/// Handle to a registered form, valid for the [`FormCache`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

impl BindingId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct FormCache<S: Storage, F: FormSurface> {
    store: KeyStore<S>,
    bindings: Vec<FormBinding<F>>,
}

impl<S: Storage, F: FormSurface> FormCache<S, F> {
    #[must_use]
    pub fn new(store: KeyStore<S>) -> Self {
        Self { store, bindings: Vec::new() }
    }

    /// Bind `form` under `key`. Returns `None`, binding nothing, when the key
    /// is missing or empty.
    pub fn register(&mut self, key: Option<&str>, form: F) -> Option<(BindingId, Vec<Lifecycle>)> {
        let key = CacheKey::new(key?)?;
        let mut binding = FormBinding::new(key, form);
        let events = binding.bind();
        let id = BindingId(self.bindings.len());
        self.bindings.push(binding);
        Some((id, events))
    }

    /// Bind `form` only if its opt-in marker is set and it carries a key.
    pub fn register_markup(
        &mut self,
        marker: Option<&str>,
        key: Option<&str>,
        form: F,
    ) -> Option<(BindingId, Vec<Lifecycle>)> {
        if !is_opted_in(marker) {
            return None;
        }
        self.register(key, form)
    }

    /// Route one event to one form. Unknown ids are ignored.
    pub fn dispatch(&mut self, id: BindingId, event: Lifecycle) {
        match self.bindings.get_mut(id.0) {
            Some(binding) => binding.handle(event, &mut self.store),
            None => log::debug!("formcache: no binding {id:?} for {event:?}"),
        }
    }

    /// Run the ready handler on every form. Returns how many restored something.
    pub fn ready_all(&mut self) -> usize {
        let mut restored = 0;
        for binding in &mut self.bindings {
            if binding.on_ready(&self.store) {
                restored += 1;
            }
        }
        restored
    }

    /// Run the unload handler on every form. Returns how many were saved.
    pub fn unload_all(&mut self) -> usize {
        let mut saved = 0;
        for binding in &mut self.bindings {
            if binding.on_unload(&mut self.store) {
                saved += 1;
            }
        }
        saved
    }

    /// Remove every cached form this store has written.
    ///
    /// # Errors
    ///
    /// See [`KeyStore::clear_all`].
    pub fn clear_all(&mut self) -> Result<usize, StoreError> {
        self.store.clear_all()
    }

    #[must_use]
    pub fn keys(&self) -> KeyIndex {
        self.store.keys()
    }

    #[must_use]
    pub fn binding(&self, id: BindingId) -> Option<&FormBinding<F>> {
        self.bindings.get(id.0)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &FormBinding<F>> {
        self.bindings.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[must_use]
    pub fn store(&self) -> &KeyStore<S> {
        &self.store
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
