use thiserror::Error;

use crate::identity::{AccountId, TokenId};

/// Ledger-wide error types for Coinage.
///
/// Every ledger entry point detects these before performing any write, so a
/// returned error always means the call left state untouched.
#[derive(Debug, Error)]
pub enum CoinageError {
    /// A one-time setup operation was repeated.
    #[error("Already initialized: {0}")]
    AlreadyInitialized(String),

    /// Query against a token or account with no record.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Debit attempted where no balance record exists.
    #[error("No balance record for account {account} and token {token}")]
    NoBalanceRecord { account: AccountId, token: TokenId },

    /// Debit amount exceeds the current balance.
    #[error(
        "Insufficient balance for account {account} and token {token}: \
         requested {requested} but only {available} available"
    )]
    InsufficientBalance {
        account: AccountId,
        token: TokenId,
        available: u64,
        requested: u64,
    },

    /// Mint amount exceeds the remaining delegated allowance.
    #[error(
        "Allowance exceeded for minter {minter} and token {token}: \
         requested {requested} but only {available} remaining"
    )]
    AllowanceExceeded {
        minter: AccountId,
        token: TokenId,
        available: u64,
        requested: u64,
    },

    /// Capability check failure.
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Allowance granted to an account with no delegation registry.
    #[error("Minter not initialized: {0}")]
    MinterNotInitialized(AccountId),

    /// A credit or supply increase would exceed the representable range.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// Scaling factors must be non-zero.
    #[error("Invalid scaling factor: {0}")]
    InvalidScalingFactor(u64),

    /// Recorded supply does not match the sum of balances.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Account identifier could not be parsed.
    #[error("Invalid account id: {0}")]
    InvalidAccount(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Snapshot file I/O error.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for CoinageError {
    fn from(e: serde_json::Error) -> Self {
        CoinageError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CoinageError {
    fn from(e: std::io::Error) -> Self {
        CoinageError::Storage(e.to_string())
    }
}
