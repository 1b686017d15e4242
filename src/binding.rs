//! Per-form controller wiring the store, serializer and restorer to page
//! lifecycle events.
//!
//! DESIGN
//! ======
//! A binding moves `Idle → Bound → (Submitted | Unloaded)`. The host asks
//! [`FormBinding::bind`] which events to deliver and then forwards them.
//!
//! ERROR HANDLING
//! ==============
//! This is the boundary where typed store/load errors collapse into the
//! page-visible outcome "nothing was restored" or "nothing was cached". They
//! are logged and dropped here; no handler ever fails or panics.

use crate::field::{FieldKind, FormField, FormSurface, NoticeSection};
use crate::restore::restore;
use crate::snapshot::serialize;
use crate::store::{KeyStore, Storage, StoreError};

/// Caller-supplied identifier for one form's cached data. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `None` for an empty key: such forms are never bound.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() { None } else { Some(Self(raw.to_string())) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Page events a bound form reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Document ready: restore cached values.
    Ready,
    /// Page going away: save current values.
    Unload,
    /// Form submitted: drop the cache.
    Submit,
    /// Reset control clicked: drop the cache and blank the form.
    Reset,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindingPhase {
    #[default]
    Idle,
    Bound,
    Submitted,
    Unloaded,
}

pub struct FormBinding<F: FormSurface> {
    key: CacheKey,
    form: F,
    submitting: bool,
    notice: Option<F::Notice>,
    phase: BindingPhase,
}

impl<F: FormSurface> FormBinding<F> {
    #[must_use]
    pub fn new(key: CacheKey, form: F) -> Self {
        Self { key, form, submitting: false, notice: None, phase: BindingPhase::Idle }
    }

    /// Bind the form and return the events the host must deliver.
    ///
    /// `Reset` is included only when the form has a notification section
    /// holding a reset control. Binding twice returns the same list.
    pub fn bind(&mut self) -> Vec<Lifecycle> {
        if self.phase == BindingPhase::Idle {
            self.notice = self.form.notice_section();
            self.phase = BindingPhase::Bound;
            log::debug!("formcache: bound form '{}'", self.key);
        }
        let mut events = vec![Lifecycle::Ready, Lifecycle::Unload, Lifecycle::Submit];
        if self.notice.is_some() && self.form.has_reset_control() {
            events.push(Lifecycle::Reset);
        }
        events
    }

    #[must_use]
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    #[must_use]
    pub fn form(&self) -> &F {
        &self.form
    }

    #[must_use]
    pub fn phase(&self) -> BindingPhase {
        self.phase
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn has_notice(&self) -> bool {
        self.notice.is_some()
    }

    /// Forward one lifecycle event. Events reaching an unbound form are ignored,
    /// here and in every `on_*` handler.
    pub fn handle<S: Storage>(&mut self, event: Lifecycle, store: &mut KeyStore<S>) {
        match event {
            Lifecycle::Ready => {
                self.on_ready(store);
            }
            Lifecycle::Unload => {
                self.on_unload(store);
            }
            Lifecycle::Submit => self.on_submit(store),
            Lifecycle::Reset => self.on_reset(store),
        }
    }

    /// Restore cached values and show or hide the notice. Returns whether
    /// anything was restored.
    pub fn on_ready<S: Storage>(&mut self, store: &KeyStore<S>) -> bool {
        if self.ignores(Lifecycle::Ready) {
            return false;
        }
        let restored = match store.get(self.key.as_str()) {
            Ok(cached) => match restore(cached.as_deref(), |name| self.form.fields_named(name)) {
                Ok(report) => {
                    log::debug!("formcache: restore '{}': {report:?}", self.key);
                    report.restored()
                }
                Err(e) => {
                    log::debug!("formcache: nothing restored for '{}': {e}", self.key);
                    false
                }
            },
            Err(e) => {
                log::debug!("formcache: cache read skipped for '{}': {e}", self.key);
                false
            }
        };
        if let Some(notice) = &self.notice {
            if restored {
                notice.show();
            } else {
                notice.hide();
            }
        }
        restored
    }

    /// Save current values unless the form is being submitted. Returns
    /// whether a non-empty snapshot was written.
    pub fn on_unload<S: Storage>(&mut self, store: &mut KeyStore<S>) -> bool {
        if self.ignores(Lifecycle::Unload) || self.submitting {
            return false;
        }
        if self.phase == BindingPhase::Bound {
            self.phase = BindingPhase::Unloaded;
        }
        let serialized = serialize(self.form.submitted_values());
        if serialized.is_empty() {
            return false;
        }
        match store.add(self.key.as_str(), &serialized) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("formcache: save dropped for '{}': {e}", self.key);
                false
            }
        }
    }

    /// Drop the cache entry and stop future saves. The submit proceeds.
    pub fn on_submit<S: Storage>(&mut self, store: &mut KeyStore<S>) {
        if self.ignores(Lifecycle::Submit) {
            return;
        }
        self.discard(store);
        self.submitting = true;
        self.phase = BindingPhase::Submitted;
    }

    /// Drop the cache entry, blank the form, notify every field and hide the notice.
    pub fn on_reset<S: Storage>(&mut self, store: &mut KeyStore<S>) {
        if self.ignores(Lifecycle::Reset) {
            return;
        }
        self.discard(store);
        self.form.reset();
        let fields = self.form.fields();
        for field in fields.iter().filter(|f| f.kind() == FieldKind::Checkbox) {
            field.set_checked(false);
        }
        for field in &fields {
            field.notify_change();
        }
        if let Some(notice) = &self.notice {
            notice.hide();
        }
    }

    /// An `Idle` binding has no handlers yet.
    fn ignores(&self, event: Lifecycle) -> bool {
        if self.phase != BindingPhase::Idle {
            return false;
        }
        log::debug!("formcache: ignoring {event:?} for unbound form '{}'", self.key);
        true
    }

    fn discard<S: Storage>(&self, store: &mut KeyStore<S>) {
        match store.remove(self.key.as_str()) {
            Ok(()) | Err(StoreError::Unavailable) => {}
            Err(e) => log::debug!("formcache: cache removal failed for '{}': {e}", self.key),
        }
    }
}

#[cfg(test)]
#[path = "binding_test.rs"]
mod tests;
