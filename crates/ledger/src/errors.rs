//! Error types for the ledger state machine.

use thiserror::Error;

/// Every failure mode an operation can report.
///
/// Operations validate all preconditions before mutating anything, so any
/// of these errors implies the ledger is byte-for-byte unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("ledger is already initialized")]
    AlreadyInitialized,

    #[error("ledger is not initialized")]
    Uninitialized,

    #[error("caller is not the ledger admin")]
    Unauthorized,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("wallet cap exceeded: cap {cap}, resulting balance {resulting}")]
    ExceedsWalletCap { cap: u64, resulting: u64 },

    #[error("issuance exceeds total supply: supply {total_supply}, requested {requested}")]
    ExceedsTotalSupply { total_supply: u64, requested: u64 },

    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LedgerError>;
