//! Witness-based authorization
//!
//! Stands in for the host's signature checking: an invocation carries the
//! set of addresses whose keys signed it.

use crate::auth::Authorizer;
use crate::core::Address;
use crate::crypto::keys::{verify_signature, KeyPair};
use secp256k1::PublicKey;
use std::collections::HashSet;

/// Addresses that witnessed (signed) the current invocation
#[derive(Clone, Debug, Default)]
pub struct WitnessSet {
    witnesses: HashSet<Address>,
}

impl WitnessSet {
    /// An invocation signed by nobody
    pub fn new() -> Self {
        Self::default()
    }

    /// Witnesses for the given addresses
    pub fn from_addresses<I: IntoIterator<Item = Address>>(addresses: I) -> Self {
        Self {
            witnesses: addresses.into_iter().collect(),
        }
    }

    /// Witnesses for every key pair that signed
    pub fn from_keys<'a, I: IntoIterator<Item = &'a KeyPair>>(keys: I) -> Self {
        Self::from_addresses(keys.into_iter().map(KeyPair::address))
    }

    pub fn len(&self) -> usize {
        self.witnesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.witnesses.is_empty()
    }
}

impl Authorizer for WitnessSet {
    fn check_witness(&self, address: &Address) -> bool {
        self.witnesses.contains(address)
    }

    fn verify_signature(&self, data: &[u8], signature: &[u8], key: &PublicKey) -> bool {
        match verify_signature(key, data, signature) {
            Ok(valid) => valid,
            Err(e) => {
                log::debug!("Rejected malformed signature: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_authorizes_nothing() {
        let witnesses = WitnessSet::new();
        assert!(witnesses.is_empty());
        assert!(!witnesses.check_witness(&Address::new([0u8; 20])));
    }

    #[test]
    fn test_from_keys() {
        let alice = KeyPair::generate();
        let bob = KeyPair::generate();
        let witnesses = WitnessSet::from_keys([&alice]);

        assert_eq!(witnesses.len(), 1);
        assert!(witnesses.check_witness(&alice.address()));
        assert!(!witnesses.check_witness(&bob.address()));
    }

    #[test]
    fn test_verify_signature() {
        let kp = KeyPair::generate();
        let signature = kp.sign(b"payload").unwrap();
        let witnesses = WitnessSet::new();

        assert!(witnesses.verify_signature(b"payload", &signature, &kp.public_key));
        assert!(!witnesses.verify_signature(b"other", &signature, &kp.public_key));
        assert!(!witnesses.verify_signature(b"payload", b"short", &kp.public_key));
    }
}
