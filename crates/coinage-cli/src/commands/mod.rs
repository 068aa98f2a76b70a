// crates/coinage-cli/src/commands/mod.rs
//
// Command module declarations and the per-invocation session shared by them.

pub mod account;
pub mod minter;
pub mod token;

use std::path::PathBuf;

use coinage_core::{AccountId, CoinageError};
use coinage_ledger::SharedLedger;

use crate::output::OutputFormat;

/// Everything a command needs: who is calling, the ledger, and where it lives.
pub struct Session {
    /// Authenticated caller identity for mutating commands.
    pub caller: AccountId,
    pub ledger: SharedLedger,
    pub state_path: PathBuf,
    pub format: OutputFormat,
}

impl Session {
    /// Persist the ledger after a successful mutation.
    pub async fn commit(&self) -> Result<(), CoinageError> {
        self.ledger.snapshot().await.save(&self.state_path)
    }
}

/// Resolve an account argument: 64 hex characters (optionally `0x`-prefixed)
/// are taken literally, anything else is treated as a label and hashed.
pub fn resolve_account(input: &str) -> AccountId {
    let hex_part = input.trim().trim_start_matches("0x");
    if hex_part.len() == 64 {
        if let Ok(id) = hex_part.parse::<AccountId>() {
            return id;
        }
    }
    AccountId::from_label(input.trim())
}

/// Resolve an optional account argument, defaulting to the caller.
pub fn resolve_or_caller(input: Option<&str>, caller: AccountId) -> AccountId {
    input.map(resolve_account).unwrap_or(caller)
}
