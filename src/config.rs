//! Storage namespace and markup contract, with opt-in gating.
//!
//! DESIGN
//! ======
//! Every cached entry is written under `prefix + cache key` so unrelated users
//! of the same origin's storage never collide with us. The key index lives
//! under its own reserved key, which must sit outside that prefix or a form
//! could overwrite it.

pub const DEFAULT_PREFIX: &str = "formcache:";
pub const DEFAULT_INDEX_KEY: &str = "formcache-index";

pub const DEFAULT_OPT_IN_ATTR: &str = "data-formcache";
pub const DEFAULT_KEY_ATTR: &str = "data-formcache-key";
pub const DEFAULT_NOTIFY_ATTR: &str = "data-formcache-notify";
pub const DEFAULT_CLEAR_ATTR: &str = "data-formcache-clear";

/// Error returned by [`FormCacheConfig::from_lookup`] and [`Namespace::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("storage prefix must not be empty")]
    EmptyPrefix,
    #[error("index key must not be empty")]
    EmptyIndexKey,
    #[error("index key '{index_key}' falls inside the entry namespace '{prefix}'")]
    IndexKeyInNamespace { index_key: String, prefix: String },
}

/// Where the key store puts things in the underlying storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
    index_key: String,
}

impl Namespace {
    /// Build a validated namespace.
    ///
    /// # Errors
    ///
    /// Fails when either part is empty or when the index key starts with the prefix.
    pub fn new(prefix: impl Into<String>, index_key: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        let index_key = index_key.into();
        if prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if index_key.is_empty() {
            return Err(ConfigError::EmptyIndexKey);
        }
        if index_key.starts_with(&prefix) {
            return Err(ConfigError::IndexKeyInNamespace { index_key, prefix });
        }
        Ok(Self { prefix, index_key })
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn index_key(&self) -> &str {
        &self.index_key
    }

    /// The storage key for a caller-supplied cache key.
    #[must_use]
    pub fn entry_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self { prefix: DEFAULT_PREFIX.to_string(), index_key: DEFAULT_INDEX_KEY.to_string() }
    }
}

/// Attribute names making up the markup contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupAttributes {
    /// Boolean marker that opts a container in.
    pub opt_in: String,
    /// Attribute carrying the cache key.
    pub key: String,
    /// Marks the optional notification section.
    pub notify: String,
    /// Marks the reset control inside the notification section.
    pub clear: String,
}

impl Default for MarkupAttributes {
    fn default() -> Self {
        Self {
            opt_in: DEFAULT_OPT_IN_ATTR.to_string(),
            key: DEFAULT_KEY_ATTR.to_string(),
            notify: DEFAULT_NOTIFY_ATTR.to_string(),
            clear: DEFAULT_CLEAR_ATTR.to_string(),
        }
    }
}

impl MarkupAttributes {
    /// CSS selector matching every opted-in container.
    #[must_use]
    pub fn opt_in_selector(&self) -> String {
        format!("[{}]", self.opt_in)
    }

    #[must_use]
    pub fn notify_selector(&self) -> String {
        format!("[{}]", self.notify)
    }

    #[must_use]
    pub fn clear_selector(&self) -> String {
        format!("[{}]", self.clear)
    }
}

/// Whether a boolean marker attribute value opts a form in.
///
/// Present with any value other than `"false"` counts, so both
/// `data-formcache` and `data-formcache="true"` opt in.
#[must_use]
pub fn is_opted_in(marker: Option<&str>) -> bool {
    match marker {
        Some(value) => !value.trim().eq_ignore_ascii_case("false"),
        None => false,
    }
}

/// Complete configuration for a page's form cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormCacheConfig {
    pub namespace: Namespace,
    pub markup: MarkupAttributes,
}

impl FormCacheConfig {
    /// Build config from a name lookup. Missing names keep their defaults.
    ///
    /// Recognised names:
    /// - `prefix`: entry namespace prefix (default `formcache:`)
    /// - `index-key`: reserved key holding the key index (default `formcache-index`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the resulting namespace is invalid.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let prefix = lookup("prefix").unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let index_key = lookup("index-key").unwrap_or_else(|| DEFAULT_INDEX_KEY.to_string());
        let namespace = Namespace::new(prefix, index_key)?;
        Ok(Self { namespace, markup: MarkupAttributes::default() })
    }

    /// Build config from environment variables, for native hosts.
    ///
    /// Optional:
    /// - `FORMCACHE_PREFIX`
    /// - `FORMCACHE_INDEX_KEY`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the resulting namespace is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| {
            let var = match name {
                "prefix" => "FORMCACHE_PREFIX",
                "index-key" => "FORMCACHE_INDEX_KEY",
                _ => return None,
            };
            std::env::var(var).ok()
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
