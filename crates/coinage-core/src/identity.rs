// crates/coinage-core/src/identity.rs

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::crypto::hash_bytes;
use crate::error::CoinageError;

/// Identity of an account on the ledger.
///
/// The ledger trusts this value: authentication happens in the host before a
/// call reaches any entry point. Serialized as 64 lowercase hex characters so
/// it can key JSON maps directly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

/// A token is identified by the address of the account that initialized it.
pub type TokenId = AccountId;

impl AccountId {
    /// Wrap raw 32 bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derive an account id from a human label (SHA-256 of the label).
    ///
    /// Used by developer tooling and tests, e.g. `AccountId::from_label("alice")`.
    pub fn from_label(label: &str) -> Self {
        Self(hash_bytes(label.as_bytes()))
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First 8 hex characters, for compact log lines and tables.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.short())
    }
}

impl FromStr for AccountId {
    type Err = CoinageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches("0x");
        let bytes = hex::decode(trimmed)
            .map_err(|e| CoinageError::InvalidAccount(format!("{}: {}", s, e)))?;
        let array: [u8; 32] = bytes.try_into().map_err(|_| {
            CoinageError::InvalidAccount(format!("{}: expected 32 bytes", s))
        })?;
        Ok(Self(array))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
