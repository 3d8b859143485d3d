//! Administrator identity
//!
//! The owner is fixed when the ledger is created. It is either a plain
//! account address or a public key; the form is resolved once here instead
//! of being re-derived from byte lengths on every call.

use crate::core::address::{Address, AddressError, ADDRESS_LENGTH};
use crate::crypto::keys::{public_key_from_hex, KeyError};
use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of a compressed secp256k1 public key
pub const PUBLIC_KEY_LENGTH: usize = 33;

#[derive(Error, Debug)]
pub enum OwnerError {
    #[error("Owner must be a 20-byte address or a 33-byte public key, got {0} bytes")]
    InvalidLength(usize),
    #[error("Invalid owner address: {0}")]
    Address(#[from] AddressError),
    #[error("Invalid owner public key: {0}")]
    PublicKey(#[from] KeyError),
}

/// The administrator identity gating mint and burn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerConfig {
    /// Authorized by a witness for this address
    Address(Address),
    /// Authorized by a witness for the key's address, or by a signature
    /// from this key on the verification path
    PublicKey(#[serde(with = "public_key_hex")] PublicKey),
}

impl OwnerConfig {
    /// Resolve the owner from its raw host form (20 or 33 bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OwnerError> {
        match bytes.len() {
            ADDRESS_LENGTH => Ok(Self::Address(Address::from_slice(bytes)?)),
            PUBLIC_KEY_LENGTH => {
                let key = PublicKey::from_slice(bytes).map_err(KeyError::from)?;
                Ok(Self::PublicKey(key))
            }
            n => Err(OwnerError::InvalidLength(n)),
        }
    }

    /// Account address of the owner
    pub fn address(&self) -> Address {
        match self {
            Self::Address(address) => *address,
            Self::PublicKey(key) => Address::from_public_key(key),
        }
    }
}

impl fmt::Display for OwnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "address {}", address),
            Self::PublicKey(key) => write!(f, "public key {}", hex::encode(key.serialize())),
        }
    }
}

impl FromStr for OwnerConfig {
    type Err = OwnerError;

    /// A 66-character hex string is read as a compressed public key,
    /// anything else as an address
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() == PUBLIC_KEY_LENGTH * 2 {
            return Ok(Self::PublicKey(public_key_from_hex(s)?));
        }
        Ok(Self::Address(s.parse()?))
    }
}

mod public_key_hex {
    use secp256k1::PublicKey;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(key: &PublicKey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(key.serialize()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PublicKey, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        PublicKey::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;

    #[test]
    fn test_from_bytes_selects_mode() {
        let kp = KeyPair::generate();

        let by_address = OwnerConfig::from_bytes(kp.address().as_bytes()).unwrap();
        assert_eq!(by_address, OwnerConfig::Address(kp.address()));

        let by_key = OwnerConfig::from_bytes(&kp.public_key.serialize()).unwrap();
        assert_eq!(by_key, OwnerConfig::PublicKey(kp.public_key));

        assert!(matches!(
            OwnerConfig::from_bytes(&[1u8; 21]),
            Err(OwnerError::InvalidLength(21))
        ));
    }

    #[test]
    fn test_owner_address_matches_key() {
        let kp = KeyPair::generate();
        let owner = OwnerConfig::PublicKey(kp.public_key);
        assert_eq!(owner.address(), kp.address());
    }

    #[test]
    fn test_parse_and_serde() {
        let kp = KeyPair::generate();

        let owner: OwnerConfig = kp.public_key_hex().parse().unwrap();
        assert_eq!(owner, OwnerConfig::PublicKey(kp.public_key));
        let json = serde_json::to_string(&owner).unwrap();
        assert!(json.contains("public_key"));
        assert_eq!(serde_json::from_str::<OwnerConfig>(&json).unwrap(), owner);

        let owner: OwnerConfig = kp.address().to_base58().parse().unwrap();
        assert_eq!(owner, OwnerConfig::Address(kp.address()));
        let json = serde_json::to_string(&owner).unwrap();
        assert_eq!(serde_json::from_str::<OwnerConfig>(&json).unwrap(), owner);
    }
}
