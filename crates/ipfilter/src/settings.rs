//! Named configuration values that supply extra address lists.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Lookup of a named setting.
///
/// A list's `config_key_*` fields name keys resolved through this trait; the
/// value uses the same format as the literal list.
pub trait SettingsSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: SettingsSource + ?Sized> SettingsSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<S: BuildHasher> SettingsSource for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl SettingsSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// No settings at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettings;

impl SettingsSource for NoSettings {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Settings read from the process environment, optionally under a prefix.
///
/// With prefix `IPFILTER_`, key `AdminIPs` reads `IPFILTER_AdminIPs`.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    prefix: String,
}

impl EnvSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl SettingsSource for EnvSettings {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}{key}", self.prefix)).ok()
    }
}

/// Ordered stack of sources; the first one that knows a key wins.
#[derive(Default)]
pub struct LayeredSettings<'a> {
    layers: Vec<&'a dyn SettingsSource>,
}

impl<'a> LayeredSettings<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append a layer consulted after every existing one.
    #[must_use]
    pub fn then(mut self, source: &'a dyn SettingsSource) -> Self {
        self.layers.push(source);
        self
    }
}

impl SettingsSource for LayeredSettings<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}

impl std::fmt::Debug for LayeredSettings<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredSettings")
            .field("layers", &self.layers.len())
            .finish()
    }
}
