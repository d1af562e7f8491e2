//! Allow/deny decision over two frozen range indexes.

use ipfilter_core::{FrozenRangeIndex, IntoAddress, RangeIndex};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{InvalidAddressPolicy, PolicyConfig};
use crate::settings::{LayeredSettings, SettingsSource};

/// Outcome of checking one client address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// On the allow list and not on the deny list
    Permit,
    /// Not on the allow list
    NotAllowed,
    /// On the deny list
    Denied,
}

impl Decision {
    #[must_use]
    pub const fn is_permitted(self) -> bool {
        matches!(self, Self::Permit)
    }

    /// Human-readable label for this decision.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Permit => "permit",
            Self::NotAllowed => "not-allowed",
            Self::Denied => "denied",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An allow list and a deny list, built once and then only read.
///
/// `permit = allow.contains(client) && !deny.contains(client)`. An empty
/// allow list therefore permits nobody.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    allow: FrozenRangeIndex,
    deny: FrozenRangeIndex,
    on_invalid_address: InvalidAddressPolicy,
}

impl AccessPolicy {
    #[must_use]
    pub fn new(allow: RangeIndex, deny: RangeIndex) -> Self {
        Self {
            allow: allow.freeze(),
            deny: deny.freeze(),
            on_invalid_address: InvalidAddressPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_invalid_address_policy(mut self, policy: InvalidAddressPolicy) -> Self {
        self.on_invalid_address = policy;
        self
    }

    /// Build both lists from `config`.
    ///
    /// `config_key_*` fields are resolved against `settings` first and the
    /// config's own `[settings]` table second.
    pub fn from_config(
        config: &PolicyConfig,
        settings: &dyn SettingsSource,
    ) -> crate::Result<Self> {
        let layered = LayeredSettings::new().then(settings).then(&config.settings);

        let mut allow = RangeIndex::new();
        let allowed = config.allow.populate(&mut allow, &layered)?;
        let mut deny = RangeIndex::new();
        let denied = config.deny.populate(&mut deny, &layered)?;

        info!(
            allow_entries = allowed,
            deny_entries = denied,
            on_invalid_address = %config.on_invalid_address,
            "access policy built"
        );
        if allowed == 0 {
            warn!("allow list is empty, every address will be refused");
        }

        Ok(Self::new(allow, deny).with_invalid_address_policy(config.on_invalid_address))
    }

    /// Classify `address`. Malformed text is always an error here.
    pub fn check(&self, address: impl IntoAddress) -> crate::Result<Decision> {
        let address = address.into_address()?;
        let allowed = self.allow.contains(address)?;
        let denied = self.deny.contains(address)?;

        let decision = if denied {
            Decision::Denied
        } else if allowed {
            Decision::Permit
        } else {
            Decision::NotAllowed
        };
        debug!(address = %address, %decision, "access check");
        Ok(decision)
    }

    /// Whether `address` may pass, applying the configured
    /// [`InvalidAddressPolicy`] to malformed input.
    pub fn permits(&self, address: &str) -> crate::Result<bool> {
        self.permits_decision(address, self.check(address))
    }

    /// [`AccessPolicy::permits`] for a [`AccessPolicy::check`] result already
    /// in hand.
    pub fn permits_decision(
        &self,
        address: &str,
        checked: crate::Result<Decision>,
    ) -> crate::Result<bool> {
        match checked {
            Ok(decision) => Ok(decision.is_permitted()),
            Err(err) if err.is_invalid_address() => match self.on_invalid_address {
                InvalidAddressPolicy::Error => Err(err),
                InvalidAddressPolicy::Deny => {
                    warn!(address, error = %err, "malformed client address, failing closed");
                    Ok(false)
                }
                InvalidAddressPolicy::Permit => {
                    warn!(address, error = %err, "malformed client address, failing open");
                    Ok(true)
                }
            },
            Err(err) => Err(err),
        }
    }

    #[must_use]
    pub const fn allow_list(&self) -> &FrozenRangeIndex {
        &self.allow
    }

    #[must_use]
    pub const fn deny_list(&self) -> &FrozenRangeIndex {
        &self.deny
    }

    #[must_use]
    pub const fn invalid_address_policy(&self) -> InvalidAddressPolicy {
        self.on_invalid_address
    }
}
