//! Cryptographic utilities for the ledger
//!
//! This module provides:
//! - SHA-256 and hash160 digests
//! - ECDSA key management (secp256k1)

pub mod hash;
pub mod keys;

pub use hash::{double_sha256, hash160, sha256, sha256_hex};
pub use keys::{public_key_from_hex, sign_message, verify_signature, KeyError, KeyPair};
