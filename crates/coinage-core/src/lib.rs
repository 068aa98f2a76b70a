// crates/coinage-core/src/lib.rs
//
// coinage-core: Core types and errors for the Coinage ledger.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the account identity used to key every ledger record and the
// error type returned by every ledger entry point.

pub mod crypto;
pub mod error;
pub mod identity;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use coinage_core::AccountId;`
pub use error::CoinageError;
pub use identity::{AccountId, TokenId};
