// crates/coinage-ledger/src/lib.rs
//
// coinage-ledger: balances, mint registry, minting delegation, and the
// ledger operations that compose them.
//
// All accounting is in unscaled amounts (the token's smallest unit). The
// per-token scaling factor only changes what scaled queries report.

pub mod balances;
pub mod delegation;
pub mod ledger;
pub mod mint;
pub mod shared;
pub mod snapshot;
pub mod token;

// Re-export key types for ergonomic access from downstream crates.
pub use balances::BalanceStore;
pub use delegation::{DelegationRegistry, TokenAuthority};
pub use ledger::TokenLedger;
pub use mint::{MintRecord, MintRegistry};
pub use shared::SharedLedger;
pub use snapshot::{load_ledger, save_ledger, LedgerSnapshot, SNAPSHOT_VERSION};
pub use token::{
    format_amount, scale, Amount, IDENTITY_SCALING_FACTOR, SCALING_FACTOR_DENOMINATOR,
};
