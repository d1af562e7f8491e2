//! Error types for building and evaluating access policies.

use ipfilter_core::FilterError;
use thiserror::Error;

/// Errors that can occur while building or consulting an [`AccessPolicy`](crate::AccessPolicy).
#[derive(Error, Debug)]
pub enum PolicyError {
    /// An address or mask was not dotted-decimal IPv4.
    #[error(transparent)]
    InvalidAddress(#[from] FilterError),

    /// A list entry did not have the shape its list requires.
    #[error("malformed entry '{entry}': {reason}")]
    MalformedEntry {
        /// The entry as written
        entry: String,
        /// What was expected instead
        reason: &'static str,
    },

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Config file read failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for a policy.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PolicyError {
    /// Returns true if the error came from a malformed client or list address
    #[must_use]
    pub const fn is_invalid_address(&self) -> bool {
        matches!(self, Self::InvalidAddress(_))
    }
}
