//! # Core Identifiers
//!
//! Account identifiers and product codes shared by every custody crate.

use crate::errors::IdentifierError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte Ethereum-style account identifier.
///
/// Rendered as `0x`-prefixed lowercase hex. The all-zero account is reserved
/// as the "empty" value on the wire and is never a valid caller.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// The reserved empty account.
    pub const ZERO: AccountId = AccountId([0u8; 20]);

    /// Build an account whose every byte is `byte`. Handy for fixtures.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Returns true for the reserved empty account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

impl FromStr for AccountId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes =
            hex::decode(digits).map_err(|_| IdentifierError::InvalidAccount(s.to_string()))?;
        let raw: [u8; 20] = bytes
            .try_into()
            .map_err(|_| IdentifierError::InvalidAccount(s.to_string()))?;
        Ok(Self(raw))
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(raw: [u8; 20]) -> Self {
        Self(raw)
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Electronic Product Code: the unique identity key of a tracked good.
///
/// A non-empty string of ASCII digits.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    /// Maximum accepted length of a product code.
    pub const MAX_LEN: usize = 64;

    /// Validate and wrap a product code.
    pub fn new(code: impl Into<String>) -> Result<Self, IdentifierError> {
        let code = code.into();
        if code.is_empty()
            || code.len() > Self::MAX_LEN
            || !code.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(IdentifierError::InvalidProductCode(code));
        }
        Ok(Self(code))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductCode({})", self.0)
    }
}

impl FromStr for ProductCode {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for ProductCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// Custody status of a tracked good.
///
/// `Created` and `Owned` are at rest with the current owner; only `Shipped`
/// carries a pending transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    Created,
    Shipped,
    Owned,
}

impl ProductStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Shipped => "Shipped",
            Self::Owned => "Owned",
        }
    }

    /// True while a shipment awaits receipt.
    #[must_use]
    pub fn is_in_transit(&self) -> bool {
        matches!(self, Self::Shipped)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
