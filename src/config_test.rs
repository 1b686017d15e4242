use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |name| map.get(name).cloned()
}

// =============================================================
// Namespace
// =============================================================

#[test]
fn namespace_default_values() {
    let ns = Namespace::default();
    assert_eq!(ns.prefix(), DEFAULT_PREFIX);
    assert_eq!(ns.index_key(), DEFAULT_INDEX_KEY);
}

#[test]
fn namespace_default_index_key_sits_outside_prefix() {
    assert!(!DEFAULT_INDEX_KEY.starts_with(DEFAULT_PREFIX));
}

#[test]
fn namespace_entry_key_prepends_prefix() {
    let ns = Namespace::default();
    assert_eq!(ns.entry_key("user-42"), "formcache:user-42");
}

#[test]
fn namespace_rejects_empty_prefix() {
    assert_eq!(Namespace::new("", "idx"), Err(ConfigError::EmptyPrefix));
}

#[test]
fn namespace_rejects_empty_index_key() {
    assert_eq!(Namespace::new("p:", ""), Err(ConfigError::EmptyIndexKey));
}

#[test]
fn namespace_rejects_index_key_inside_prefix() {
    let err = Namespace::new("app:", "app:index").unwrap_err();
    assert_eq!(
        err,
        ConfigError::IndexKeyInNamespace { index_key: "app:index".into(), prefix: "app:".into() }
    );
    assert!(err.to_string().contains("app:index"));
}

// =============================================================
// Markup gating
// =============================================================

#[test]
fn opted_in_when_marker_true() {
    assert!(is_opted_in(Some("true")));
}

#[test]
fn opted_in_when_marker_present_without_value() {
    assert!(is_opted_in(Some("")));
}

#[test]
fn not_opted_in_when_marker_false() {
    assert!(!is_opted_in(Some("false")));
    assert!(!is_opted_in(Some(" FALSE ")));
}

#[test]
fn not_opted_in_when_marker_absent() {
    assert!(!is_opted_in(None));
}

#[test]
fn markup_selectors_wrap_attribute_names() {
    let markup = MarkupAttributes::default();
    assert_eq!(markup.opt_in_selector(), "[data-formcache]");
    assert_eq!(markup.notify_selector(), "[data-formcache-notify]");
    assert_eq!(markup.clear_selector(), "[data-formcache-clear]");
    assert_eq!(markup.key, "data-formcache-key");
}

// =============================================================
// FormCacheConfig
// =============================================================

#[test]
fn from_lookup_uses_defaults_when_empty() {
    let cfg = FormCacheConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, FormCacheConfig::default());
}

#[test]
fn from_lookup_applies_overrides() {
    let cfg = FormCacheConfig::from_lookup(lookup_from(&[("prefix", "shop:"), ("index-key", "shop-index")])).unwrap();
    assert_eq!(cfg.namespace.prefix(), "shop:");
    assert_eq!(cfg.namespace.index_key(), "shop-index");
    assert_eq!(cfg.markup, MarkupAttributes::default());
}

#[test]
fn from_lookup_rejects_colliding_index_key() {
    let result = FormCacheConfig::from_lookup(lookup_from(&[("prefix", "fc"), ("index-key", "fc-index")]));
    assert!(matches!(result, Err(ConfigError::IndexKeyInNamespace { .. })));
}

#[test]
fn from_env_reads_overrides() {
    // Safety: this is the only test in the crate touching these variables.
    unsafe {
        std::env::set_var("FORMCACHE_PREFIX", "env:");
        std::env::set_var("FORMCACHE_INDEX_KEY", "env-index");
    }
    let cfg = FormCacheConfig::from_env().unwrap();
    assert_eq!(cfg.namespace.prefix(), "env:");
    assert_eq!(cfg.namespace.index_key(), "env-index");
    unsafe {
        std::env::remove_var("FORMCACHE_PREFIX");
        std::env::remove_var("FORMCACHE_INDEX_KEY");
    }
}
