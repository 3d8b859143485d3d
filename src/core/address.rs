//! Account addresses
//!
//! An address is the 20-byte hash160 of a compressed secp256k1 public key.
//! Its text form is Base58Check with a single version byte.

use crate::crypto::hash::{double_sha256, hash160};
use secp256k1::PublicKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of an address in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Version byte prefixed to the Base58Check form
pub const ADDRESS_VERSION: u8 = 0x00;

/// Address parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
    #[error("Invalid address encoding")]
    InvalidEncoding,
    #[error("Invalid address checksum")]
    InvalidChecksum,
    #[error("Invalid address version: {0:#04x}")]
    InvalidVersion(u8),
}

/// A fixed-length account identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Build an address from raw bytes, rejecting any other length
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let array: [u8; ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }

    /// Address controlled by the given public key
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self(hash160(&public_key.serialize()))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Base58Check(version || hash160 || checksum)
    pub fn to_base58(&self) -> String {
        let mut payload = Vec::with_capacity(1 + ADDRESS_LENGTH + 4);
        payload.push(ADDRESS_VERSION);
        payload.extend_from_slice(&self.0);
        let checksum = double_sha256(&payload);
        payload.extend_from_slice(&checksum[..4]);
        bs58::encode(payload).into_string()
    }

    /// Parse the Base58Check form
    pub fn from_base58(s: &str) -> Result<Self, AddressError> {
        let data = bs58::decode(s)
            .into_vec()
            .map_err(|_| AddressError::InvalidEncoding)?;
        if data.len() != 1 + ADDRESS_LENGTH + 4 {
            return Err(AddressError::InvalidLength(data.len().saturating_sub(5)));
        }

        let (payload, checksum) = data.split_at(1 + ADDRESS_LENGTH);
        if &double_sha256(payload)[..4] != checksum {
            return Err(AddressError::InvalidChecksum);
        }
        if payload[0] != ADDRESS_VERSION {
            return Err(AddressError::InvalidVersion(payload[0]));
        }

        Self::from_slice(&payload[1..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Accepts Base58Check or 40 hex characters
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex_part = s.strip_prefix("0x").unwrap_or(s);
        if hex_part.len() == ADDRESS_LENGTH * 2 {
            if let Ok(bytes) = hex::decode(hex_part) {
                return Self::from_slice(&bytes);
            }
        }
        Self::from_base58(s)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;

    #[test]
    fn test_from_slice_length() {
        assert!(Address::from_slice(&[7u8; 20]).is_ok());
        assert_eq!(
            Address::from_slice(&[7u8; 33]),
            Err(AddressError::InvalidLength(33))
        );
        assert_eq!(Address::from_slice(&[]), Err(AddressError::InvalidLength(0)));
    }

    #[test]
    fn test_base58_format() {
        let kp = KeyPair::generate();
        let text = kp.address().to_base58();
        // Version 0x00 addresses start with 1
        assert!(text.starts_with('1'));
        assert_eq!(Address::from_base58(&text).unwrap(), kp.address());
    }

    #[test]
    fn test_checksum_rejected() {
        let address = Address::new([9u8; 20]);
        let mut text = address.to_base58();
        let last = text.pop().unwrap();
        text.push(if last == '2' { '3' } else { '2' });
        assert!(matches!(
            Address::from_base58(&text),
            Err(AddressError::InvalidChecksum) | Err(AddressError::InvalidEncoding)
        ));
    }

    #[test]
    fn test_parse_hex() {
        let address: Address = "0x0102030405060708090a0b0c0d0e0f1011121314".parse().unwrap();
        assert_eq!(address.as_bytes()[0], 1);
        assert_eq!(address.as_bytes()[19], 0x14);
    }

    #[test]
    fn test_serde_uses_text_form() {
        let address = Address::new([3u8; 20]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address.to_base58()));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
