//! Host key/value store interface
//!
//! The ledger never holds state between calls; everything it knows is read
//! from a [`Store`] at the start of each invocation.

use crate::core::Address;
use num::BigInt;
use std::collections::BTreeMap;

/// Prefix byte for account balance keys
pub const BALANCE_PREFIX: u8 = 0x01;

/// Prefix byte for scalar counter keys
pub const COUNTER_PREFIX: u8 = 0x02;

/// Key/value storage provided by the host
///
/// Writes are scoped to the current invocation; the host decides when they
/// become durable.
pub trait Store {
    /// Get a value, `None` if the key is absent
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Insert or overwrite a value
    fn put(&mut self, key: &[u8], value: &[u8]);

    /// Remove a key (no-op if absent)
    fn delete(&mut self, key: &[u8]);
}

/// The three well-known scalar counters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Counter {
    TotalSupply,
    TotalUsed,
    TotalBurned,
}

impl Counter {
    pub fn name(&self) -> &'static str {
        match self {
            Counter::TotalSupply => "totalSupply",
            Counter::TotalUsed => "totalUsed",
            Counter::TotalBurned => "totalBurned",
        }
    }

    pub fn key(&self) -> Vec<u8> {
        let name = self.name().as_bytes();
        let mut key = Vec::with_capacity(1 + name.len());
        key.push(COUNTER_PREFIX);
        key.extend_from_slice(name);
        key
    }
}

/// Storage key of an account balance
pub fn balance_key(address: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(21);
    key.push(BALANCE_PREFIX);
    key.extend_from_slice(address.as_bytes());
    key
}

/// Address encoded in a balance key, if it is one
pub fn address_from_key(key: &[u8]) -> Option<Address> {
    match key.split_first() {
        Some((&BALANCE_PREFIX, rest)) => Address::from_slice(rest).ok(),
        _ => None,
    }
}

/// Little-endian two's complement, zero as the empty value
pub fn encode_integer(value: &BigInt) -> Vec<u8> {
    if value.sign() == num::bigint::Sign::NoSign {
        Vec::new()
    } else {
        value.to_signed_bytes_le()
    }
}

/// Inverse of [`encode_integer`]; absent or empty values are zero
pub fn decode_integer(bytes: Option<&[u8]>) -> BigInt {
    match bytes {
        Some(bytes) if !bytes.is_empty() => BigInt::from_signed_bytes_le(bytes),
        _ => BigInt::default(),
    }
}

/// In-memory store, used as a test double and as the CLI's working copy
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&Vec<u8>, &Vec<u8>)> {
        self.entries.iter()
    }

    /// All stored account balances
    pub fn balances(&self) -> Vec<(Address, BigInt)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                address_from_key(key).map(|address| (address, decode_integer(Some(value))))
            })
            .collect()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.entries.insert(key.to_vec(), value.to_vec());
    }

    fn delete(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }
}

impl FromIterator<(Vec<u8>, Vec<u8>)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (Vec<u8>, Vec<u8>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_put_delete() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(b"k"), None);

        store.put(b"k", b"v1");
        store.put(b"k", b"v2");
        assert_eq!(store.get(b"k"), Some(b"v2".to_vec()));
        assert_eq!(store.len(), 1);

        store.delete(b"k");
        store.delete(b"k");
        assert!(store.is_empty());
    }

    #[test]
    fn test_key_namespaces_are_disjoint() {
        let address = Address::new([b't'; 20]);
        let balance = balance_key(&address);
        for counter in [Counter::TotalSupply, Counter::TotalUsed, Counter::TotalBurned] {
            assert_ne!(balance, counter.key());
            assert_eq!(address_from_key(&counter.key()), None);
        }
        assert_eq!(address_from_key(&balance), Some(address));
    }

    #[test]
    fn test_integer_encoding() {
        assert!(encode_integer(&BigInt::from(0)).is_empty());
        assert_eq!(encode_integer(&BigInt::from(1)), vec![0x01]);
        // 128 needs a sign byte
        assert_eq!(encode_integer(&BigInt::from(128)), vec![0x80, 0x00]);
        assert_eq!(encode_integer(&BigInt::from(-1)), vec![0xff]);

        assert_eq!(decode_integer(None), BigInt::from(0));
        assert_eq!(decode_integer(Some(&[])), BigInt::from(0));
        assert_eq!(decode_integer(Some(&[0x80, 0x00])), BigInt::from(128));
        assert_eq!(decode_integer(Some(&[0x9c])), BigInt::from(-100));
    }

    #[test]
    fn test_large_integer_survives_store() {
        let big: BigInt = "340282366920938463463374607431768211457".parse().unwrap();
        let mut store = MemoryStore::new();
        store.put(&Counter::TotalSupply.key(), &encode_integer(&big));
        let read = store.get(&Counter::TotalSupply.key());
        assert_eq!(decode_integer(read.as_deref()), big);
    }
}
