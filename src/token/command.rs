//! Typed commands
//!
//! Loosely-typed calls (an operation name plus positional arguments) are
//! decoded into a [`Command`] exactly once, at the boundary.

use crate::core::Address;
use crate::storage::decode_integer;
use num::BigInt;
use std::fmt;
use thiserror::Error;

/// A positional call argument as supplied by the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    Bytes(Vec<u8>),
    Integer(BigInt),
}

impl Arg {
    fn as_address(&self, position: usize) -> Result<Address, DecodeError> {
        match self {
            Arg::Bytes(bytes) => {
                Address::from_slice(bytes).map_err(|_| DecodeError::InvalidArgument(position))
            }
            Arg::Integer(_) => Err(DecodeError::InvalidArgument(position)),
        }
    }

    fn as_amount(&self) -> BigInt {
        match self {
            Arg::Integer(value) => value.clone(),
            // Byte arguments are read the way the host reads integers
            Arg::Bytes(bytes) => decode_integer(Some(bytes)),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    #[error("Wrong number of arguments: expected {expected}, got {got}")]
    WrongArity { expected: usize, got: usize },
    #[error("Invalid argument at position {0}")]
    InvalidArgument(usize),
}

/// Every operation the ledger accepts
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Transfer {
        from: Address,
        to: Address,
        amount: BigInt,
    },
    Mint {
        to: Address,
        amount: BigInt,
    },
    Burn {
        from: Address,
        amount: BigInt,
    },
    Use {
        from: Address,
        amount: BigInt,
    },
    BalanceOf {
        account: Address,
    },
    TotalSupply,
    TotalUsed,
    TotalBurned,
    Name,
    Symbol,
    Decimals,
}

impl Command {
    /// Decode an operation name and its arguments
    pub fn decode(operation: &str, args: &[Arg]) -> Result<Self, DecodeError> {
        let command = match operation {
            "transfer" => {
                expect_arity(args, 3)?;
                Command::Transfer {
                    from: args[0].as_address(0)?,
                    to: args[1].as_address(1)?,
                    amount: args[2].as_amount(),
                }
            }
            "mint" | "mintTokensTo" => {
                expect_arity(args, 2)?;
                Command::Mint {
                    to: args[0].as_address(0)?,
                    amount: args[1].as_amount(),
                }
            }
            "burn" | "burnTokens" | "burnTokensFrom" => {
                expect_arity(args, 2)?;
                Command::Burn {
                    from: args[0].as_address(0)?,
                    amount: args[1].as_amount(),
                }
            }
            "use" | "useTokens" => {
                expect_arity(args, 2)?;
                Command::Use {
                    from: args[0].as_address(0)?,
                    amount: args[1].as_amount(),
                }
            }
            "balanceOf" => {
                expect_arity(args, 1)?;
                Command::BalanceOf {
                    account: args[0].as_address(0)?,
                }
            }
            "totalSupply" => Command::TotalSupply,
            "totalUsed" => Command::TotalUsed,
            "totalBurned" => Command::TotalBurned,
            "name" => Command::Name,
            "symbol" => Command::Symbol,
            "decimals" => Command::Decimals,
            other => return Err(DecodeError::UnknownOperation(other.to_string())),
        };
        Ok(command)
    }

    /// Canonical operation name
    pub fn operation(&self) -> &'static str {
        match self {
            Command::Transfer { .. } => "transfer",
            Command::Mint { .. } => "mintTokensTo",
            Command::Burn { .. } => "burnTokens",
            Command::Use { .. } => "useTokens",
            Command::BalanceOf { .. } => "balanceOf",
            Command::TotalSupply => "totalSupply",
            Command::TotalUsed => "totalUsed",
            Command::TotalBurned => "totalBurned",
            Command::Name => "name",
            Command::Symbol => "symbol",
            Command::Decimals => "decimals",
        }
    }

    /// True for commands that may change the store
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::Transfer { .. } | Command::Mint { .. } | Command::Burn { .. } | Command::Use { .. }
        )
    }
}

fn expect_arity(args: &[Arg], expected: usize) -> Result<(), DecodeError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(DecodeError::WrongArity {
            expected,
            got: args.len(),
        })
    }
}

/// Result of a dispatched call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Bool(bool),
    Integer(BigInt),
    Text(&'static str),
}

impl Outcome {
    /// The falsy value a malformed call to `operation` returns
    pub fn failure_for(operation: &str) -> Self {
        match operation {
            "balanceOf" | "mint" | "mintTokensTo" | "burn" | "burnTokens" | "burnTokensFrom"
            | "use" | "useTokens" => Outcome::Integer(BigInt::default()),
            _ => Outcome::Bool(false),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Bool(b) => write!(f, "{}", b),
            Outcome::Integer(i) => write!(f, "{}", i),
            Outcome::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Arg {
        Arg::Bytes(vec![byte; 20])
    }

    fn int(value: i64) -> Arg {
        Arg::Integer(BigInt::from(value))
    }

    #[test]
    fn test_decode_transfer() {
        let command = Command::decode("transfer", &[addr(1), addr(2), int(5)]).unwrap();
        assert_eq!(
            command,
            Command::Transfer {
                from: Address::new([1; 20]),
                to: Address::new([2; 20]),
                amount: BigInt::from(5),
            }
        );
        assert!(command.is_mutation());
    }

    #[test]
    fn test_aliases() {
        let args = [addr(1), int(5)];
        assert_eq!(
            Command::decode("mint", &args).unwrap(),
            Command::decode("mintTokensTo", &args).unwrap()
        );
        for name in ["burn", "burnTokens", "burnTokensFrom"] {
            assert!(matches!(
                Command::decode(name, &args).unwrap(),
                Command::Burn { .. }
            ));
        }
        assert_eq!(
            Command::decode("use", &args).unwrap(),
            Command::decode("useTokens", &args).unwrap()
        );
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(
            Command::decode("transfer", &[addr(1), addr(2)]),
            Err(DecodeError::WrongArity {
                expected: 3,
                got: 2
            })
        );
        assert!(Command::decode("balanceOf", &[]).is_err());
        assert!(Command::decode("useTokens", &[addr(1), int(1), int(1)]).is_err());
    }

    #[test]
    fn test_invalid_argument_types() {
        // 33-byte identifier where an account is expected
        let result = Command::decode("balanceOf", &[Arg::Bytes(vec![0; 33])]);
        assert_eq!(result, Err(DecodeError::InvalidArgument(0)));

        let result = Command::decode("mint", &[int(1), int(1)]);
        assert_eq!(result, Err(DecodeError::InvalidArgument(0)));
    }

    #[test]
    fn test_byte_amounts_use_host_encoding() {
        let command = Command::decode("mint", &[addr(1), Arg::Bytes(vec![0x80, 0x00])]).unwrap();
        assert_eq!(
            command,
            Command::Mint {
                to: Address::new([1; 20]),
                amount: BigInt::from(128),
            }
        );
    }

    #[test]
    fn test_queries_ignore_arguments() {
        assert_eq!(
            Command::decode("totalSupply", &[int(1)]).unwrap(),
            Command::TotalSupply
        );
        assert!(!Command::TotalSupply.is_mutation());
        assert_eq!(Command::decode("decimals", &[]).unwrap().operation(), "decimals");
    }

    #[test]
    fn test_unknown_operation() {
        assert_eq!(
            Command::decode("approve", &[]),
            Err(DecodeError::UnknownOperation("approve".to_string()))
        );
    }

    #[test]
    fn test_failure_values() {
        assert_eq!(Outcome::failure_for("transfer"), Outcome::Bool(false));
        assert_eq!(Outcome::failure_for("nonsense"), Outcome::Bool(false));
        assert_eq!(
            Outcome::failure_for("balanceOf"),
            Outcome::Integer(BigInt::default())
        );
        assert_eq!(
            Outcome::failure_for("useTokens"),
            Outcome::Integer(BigInt::default())
        );
        assert_eq!(
            Outcome::failure_for("mint"),
            Outcome::Integer(BigInt::default())
        );
    }
}
