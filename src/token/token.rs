//! Open Point token definition
//!
//! Static metadata and the error taxonomy shared by all ledger operations.

use num::BigInt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token display name
pub const NAME: &str = "Open Point Token";

/// Ticker symbol
pub const SYMBOL: &str = "OPT";

/// Decimal places; points are indivisible
pub const DECIMALS: u8 = 0;

/// Why a ledger operation was rejected
///
/// Callers at the public boundary only ever see `false`; the variants exist
/// for logging and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("Unauthorized: missing witness for the required identity")]
    Unauthorized,
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientFunds { have: BigInt, need: BigInt },
}

/// Token metadata (constant for the lifetime of the ledger)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Decimal places
    pub decimals: u8,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: NAME.to_string(),
            symbol: SYMBOL.to_string(),
            decimals: DECIMALS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_constants() {
        let metadata = TokenMetadata::default();
        assert_eq!(metadata.name, "Open Point Token");
        assert_eq!(metadata.symbol, "OPT");
        assert_eq!(metadata.decimals, 0);
    }

    #[test]
    fn test_error_messages() {
        let err = TokenError::InsufficientFunds {
            have: BigInt::from(5),
            need: BigInt::from(8),
        };
        assert_eq!(err.to_string(), "Insufficient balance: have 5, need 8");
        assert!(TokenError::InvalidAmount.to_string().contains("greater than 0"));
    }
}
