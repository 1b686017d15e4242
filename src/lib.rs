//! Client-side form caching: keep a user's in-progress form input in the
//! browser's key-value store so it survives accidental navigation, and put it
//! back when they return.
//!
//! This crate is host-independent. It never touches the DOM or `localStorage`
//! directly; the browser adapter (`formcache-web`) implements the [`store::Storage`]
//! and [`field::FormSurface`] traits and forwards page lifecycle events into a
//! [`cache::FormCache`]. Everything here can therefore be exercised natively
//! against [`store::MemoryStorage`] and the [`memory`] form model.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Storage namespace, markup attribute names, opt-in gating |
//! | [`store`] | Namespaced [`store::KeyStore`] with its persisted key index |
//! | [`snapshot`] | Serializer: form values to and from the compact cached string |
//! | [`field`] | Traits the host implements for forms, fields and the notice |
//! | [`restore`] | Writes cached values back into live fields by type tag |
//! | [`binding`] | Per-form lifecycle controller (ready, unload, submit, reset) |
//! | [`cache`] | Registry owning the store and every binding on a page |
//! | [`memory`] | In-memory form model for tests and non-browser hosts |

pub mod binding;
pub mod cache;
pub mod config;
pub mod field;
pub mod memory;
pub mod restore;
pub mod snapshot;
pub mod store;

pub use binding::{BindingPhase, CacheKey, FormBinding, Lifecycle};
pub use cache::{BindingId, FormCache};
pub use config::{ConfigError, FormCacheConfig, MarkupAttributes, Namespace};
pub use field::{FieldKind, FormField, FormSurface, NoticeSection};
pub use restore::{RestoreReport, restore, restore_snapshot};
pub use snapshot::{FormSnapshot, LoadError, serialize};
pub use store::{KeyIndex, KeyStore, MemoryStorage, Storage, StoreError};
