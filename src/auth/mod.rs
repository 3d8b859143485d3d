//! Authorization primitives supplied by the host
//!
//! The ledger only asks two questions: did the holder of this address sign
//! the invocation, and is this signature valid for this key.

pub mod witness;

pub use witness::WitnessSet;

use crate::core::{Address, OwnerConfig};
use secp256k1::PublicKey;

/// Host-provided proof of control over an identity
pub trait Authorizer {
    /// True if the current caller controls `address`
    fn check_witness(&self, address: &Address) -> bool;

    /// True if `signature` over `data` was made by `key`
    fn verify_signature(&self, data: &[u8], signature: &[u8], key: &PublicKey) -> bool;
}

/// Whether the caller is authorized as the ledger administrator
pub fn is_owner_authorized(owner: &OwnerConfig, auth: &dyn Authorizer) -> bool {
    auth.check_witness(&owner.address())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;

    #[test]
    fn test_owner_check_both_modes() {
        let admin = KeyPair::generate();
        let stranger = KeyPair::generate();

        for owner in [
            OwnerConfig::Address(admin.address()),
            OwnerConfig::PublicKey(admin.public_key),
        ] {
            assert!(is_owner_authorized(&owner, &WitnessSet::from_keys([&admin])));
            assert!(!is_owner_authorized(&owner, &WitnessSet::from_keys([&stranger])));
            assert!(!is_owner_authorized(&owner, &WitnessSet::new()));
        }
    }
}
