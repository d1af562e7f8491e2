use thiserror::Error;

/// Result type alias for range-index operations
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors raised by the matching engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Text that is not a dotted-decimal IPv4 address
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),
}

impl FilterError {
    /// The offending input, as given by the caller
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidAddress(input) => input,
        }
    }
}
