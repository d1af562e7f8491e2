//! Numeric IPv4 addresses and their dotted-decimal form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::{FilterError, Result};

/// An IPv4 address packed big-endian into a `u32` (`o0<<24 | o1<<16 | o2<<8 | o3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(u32);

impl Address {
    /// `0.0.0.0`
    pub const MIN: Self = Self(0);

    /// `255.255.255.255`
    pub const MAX: Self = Self(u32::MAX);

    /// Wrap a raw numeric address
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Build from four octets, most significant first
    #[must_use]
    pub const fn from_octets(o0: u8, o1: u8, o2: u8, o3: u8) -> Self {
        Self(u32::from_be_bytes([o0, o1, o2, o3]))
    }

    /// The raw numeric value
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The four octets, most significant first
    #[must_use]
    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse dotted-decimal text.
    ///
    /// The text must split on `.` into exactly four decimal octets in
    /// `0..=255`. Whitespace around the whole address is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let invalid = || FilterError::InvalidAddress(text.to_string());

        let mut octets = [0u8; 4];
        let mut count = 0;
        for part in trimmed.split('.') {
            if count == 4 || part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            octets[count] = part.parse::<u8>().map_err(|_| invalid())?;
            count += 1;
        }

        if count != 4 {
            return Err(invalid());
        }

        Ok(Self(u32::from_be_bytes(octets)))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl FromStr for Address {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Address> for u32 {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Self(u32::from(ip))
    }
}

impl From<Address> for Ipv4Addr {
    fn from(addr: Address) -> Self {
        Self::from(addr.0)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Anything the index accepts where an address is expected.
///
/// Text goes through [`Address::parse`]; numeric forms never fail.
pub trait IntoAddress {
    fn into_address(self) -> Result<Address>;
}

impl IntoAddress for Address {
    fn into_address(self) -> Result<Address> {
        Ok(self)
    }
}

impl IntoAddress for u32 {
    fn into_address(self) -> Result<Address> {
        Ok(Address(self))
    }
}

impl IntoAddress for Ipv4Addr {
    fn into_address(self) -> Result<Address> {
        Ok(self.into())
    }
}

impl IntoAddress for &str {
    fn into_address(self) -> Result<Address> {
        Address::parse(self)
    }
}

impl IntoAddress for &String {
    fn into_address(self) -> Result<Address> {
        Address::parse(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_packs_big_endian() {
        let addr = Address::parse("192.168.1.5").unwrap();
        assert_eq!(addr.value(), 0xC0A8_0105);
        assert_eq!(addr, Address::from_octets(192, 168, 1, 5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Address::new(0x0A00_0005).to_string(), "10.0.0.5");
        assert_eq!(Address::MAX.to_string(), "255.255.255.255");
        assert_eq!(Address::MIN.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_ipv4addr_conversion() {
        let ip = Ipv4Addr::new(203, 0, 113, 42);
        let addr = Address::from(ip);
        assert_eq!(Ipv4Addr::from(addr), ip);
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(
            Address::parse(" 10.0.0.1\t").unwrap(),
            Address::from_octets(10, 0, 0, 1)
        );
    }

    #[test]
    fn test_invalid_addresses() {
        for bad in [
            "10.0.0",
            "10.0.0.0.1",
            "",
            "10..0.1",
            "a.b.c.d",
            "10.0.0.256",
            "10.0.0.-1",
            "10.0.0.+1",
            "10.0 .0.1",
        ] {
            let err = Address::parse(bad).unwrap_err();
            assert_eq!(err, FilterError::InvalidAddress(bad.to_string()), "{bad}");
        }
    }

    #[test]
    fn test_serde_as_dotted_string() {
        let addr = Address::from_octets(8, 8, 4, 4);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"8.8.4.4\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        assert!(serde_json::from_str::<Address>("\"8.8.4\"").is_err());
    }
}
