//! Policy configuration, loaded from TOML.
//!
//! ```toml
//! on_invalid_address = "deny"
//!
//! [allow]
//! ips = "8.8.8.8,127.0.0.1"
//! masked_ips = "10.11.0.0;255.255.0.0"
//! config_key_ips = "AdminIPs"
//!
//! [deny]
//! ranges = "10.11.5.0-10.11.5.255"
//!
//! [settings]
//! AdminIPs = "203.0.113.7,203.0.113.8"
//! ```

use ipfilter_core::RangeIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::error::PolicyError;
use crate::lists::{add_masked_list, add_range_list, add_single_list};
use crate::settings::SettingsSource;

/// Where the entries of one list (allow or deny) come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListSources {
    /// Comma-separated single addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ips: Option<String>,

    /// Comma-separated `address;mask` entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_ips: Option<String>,

    /// Comma-separated `from-to` entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<String>,

    /// Settings key whose value is a single-address list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_key_ips: Option<String>,

    /// Settings key whose value is a masked list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_key_masked_ips: Option<String>,
}

impl ListSources {
    /// Returns true if no source is configured
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ips.is_none()
            && self.masked_ips.is_none()
            && self.ranges.is_none()
            && self.config_key_ips.is_none()
            && self.config_key_masked_ips.is_none()
    }

    /// Feed every configured source into `index`. Returns the entry count.
    ///
    /// Keys that resolve to nothing contribute nothing.
    pub fn populate(
        &self,
        index: &mut RangeIndex,
        settings: &dyn SettingsSource,
    ) -> crate::Result<usize> {
        let mut added = 0;

        if let Some(list) = self.ips.as_deref() {
            added += add_single_list(index, list)?;
        }
        if let Some(list) = self.masked_ips.as_deref() {
            added += add_masked_list(index, list)?;
        }
        if let Some(list) = self.ranges.as_deref() {
            added += add_range_list(index, list)?;
        }
        if let Some(list) = lookup(settings, self.config_key_ips.as_deref()) {
            added += add_single_list(index, &list)?;
        }
        if let Some(list) = lookup(settings, self.config_key_masked_ips.as_deref()) {
            added += add_masked_list(index, &list)?;
        }

        Ok(added)
    }
}

fn lookup(settings: &dyn SettingsSource, key: Option<&str>) -> Option<String> {
    let key = key.filter(|k| !k.is_empty())?;
    let value = settings.get(key);
    if value.is_none() {
        debug!(key, "settings key not set, skipping");
    }
    value
}

/// What to do when the client address itself is malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidAddressPolicy {
    /// Hand the parse error back to the caller
    #[default]
    Error,
    /// Fail closed
    Deny,
    /// Fail open
    Permit,
}

impl std::fmt::Display for InvalidAddressPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Deny => write!(f, "deny"),
            Self::Permit => write!(f, "permit"),
        }
    }
}

/// Full policy configuration.
///
/// Unknown keys are rejected, here and in `[allow]`/`[deny]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Behaviour for malformed client addresses (default: error).
    #[serde(default)]
    pub on_invalid_address: InvalidAddressPolicy,

    /// Addresses that may pass.
    #[serde(default)]
    pub allow: ListSources,

    /// Addresses rejected even when allowed.
    #[serde(default)]
    pub deny: ListSources,

    /// Named values referenced by `config_key_*` fields.
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

impl PolicyConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            debug!(path = %path.display(), "no policy file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| PolicyError::Config(e.to_string()))
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
