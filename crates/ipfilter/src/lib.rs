//! IPv4 allow/deny access policy.
//!
//! Combines two [`ipfilter_core::RangeIndex`] instances, an allow list and a
//! deny list, into one decision per client address:
//!
//! ```text
//! permit = allow.contains(client) && !deny.contains(client)
//! ```
//!
//! Each list is fed from up to five textual sources (see [`ListSources`]):
//! literal single addresses, literal `address;mask` pairs, literal
//! `from-to` ranges, and single/masked lists read from named settings.
//! Finding the client address inside a request is left to the caller.
//!
//! # Example
//!
//! ```rust
//! use ipfilter::{AccessPolicy, Decision, NoSettings, PolicyConfig};
//!
//! let config = PolicyConfig::from_toml(r#"
//!     [allow]
//!     masked_ips = "10.11.0.0;255.255.0.0"
//!
//!     [deny]
//!     ips = "10.11.0.66"
//! "#)?;
//!
//! let policy = AccessPolicy::from_config(&config, &NoSettings)?;
//! assert_eq!(policy.check("10.11.3.4")?, Decision::Permit);
//! assert_eq!(policy.check("10.11.0.66")?, Decision::Denied);
//! assert!(!policy.permits("192.0.2.1")?);
//! # Ok::<(), ipfilter::PolicyError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/ipfilter/0.1.0")]

pub mod config;
pub mod error;
pub mod lists;
pub mod policy;
pub mod settings;

pub use config::{InvalidAddressPolicy, ListSources, PolicyConfig};
pub use error::PolicyError;
pub use policy::{AccessPolicy, Decision};
pub use settings::{EnvSettings, LayeredSettings, NoSettings, SettingsSource};

// Re-export the engine for convenience.
pub use ipfilter_core as engine;
pub use ipfilter_core::{Address, Block, FrozenRangeIndex, RangeIndex};

/// Result type for policy operations.
pub type Result<T> = std::result::Result<T, PolicyError>;
