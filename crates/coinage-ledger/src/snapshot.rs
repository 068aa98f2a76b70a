// crates/coinage-ledger/src/snapshot.rs
//
// JSON snapshots of the whole ledger.
//
// The host owns durability; a snapshot is how the developer CLI carries state
// between invocations. Saves go to a sibling temp file first and are renamed
// into place, so a reader only ever sees a complete snapshot.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use coinage_core::CoinageError;

use crate::ledger::TokenLedger;

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of a `TokenLedger`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Format version; loading rejects anything but `SNAPSHOT_VERSION`.
    pub version: u32,
    /// The ledger state.
    pub ledger: TokenLedger,
}

impl LedgerSnapshot {
    /// Capture the current state of `ledger`.
    pub fn capture(ledger: &TokenLedger) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            ledger: ledger.clone(),
        }
    }

    /// Unwrap the ledger, checking the format version.
    pub fn into_ledger(self) -> Result<TokenLedger, CoinageError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CoinageError::Serialization(format!(
                "unsupported snapshot version {} (expected {})",
                self.version, SNAPSHOT_VERSION
            )));
        }
        Ok(self.ledger)
    }

    /// Write the snapshot to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), CoinageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(self)?;
        let tmp = temp_path(path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        tracing::debug!("Snapshot written to {}", path.display());
        Ok(())
    }

    /// Read a snapshot from `path`.
    pub fn load(path: &Path) -> Result<Self, CoinageError> {
        let bytes = fs::read(path)?;
        let snapshot: LedgerSnapshot = serde_json::from_slice(&bytes)?;
        Ok(snapshot)
    }
}

/// Load the ledger stored at `path`, or an empty ledger if the file is absent.
pub fn load_ledger(path: &Path) -> Result<TokenLedger, CoinageError> {
    if !path.exists() {
        tracing::info!("No snapshot at {}; starting from an empty ledger", path.display());
        return Ok(TokenLedger::new());
    }
    LedgerSnapshot::load(path)?.into_ledger()
}

/// Persist `ledger` to `path`.
pub fn save_ledger(ledger: &TokenLedger, path: &Path) -> Result<(), CoinageError> {
    LedgerSnapshot::capture(ledger).save(path)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinage_core::AccountId;

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("coinage_test_{}_{}", label, uuid::Uuid::new_v4()))
            .join("ledger.json")
    }

    #[test]
    fn test_missing_file_gives_empty_ledger() {
        let ledger = load_ledger(&temp_file("missing")).unwrap();
        assert_eq!(ledger.tokens().count(), 0);
    }

    #[test]
    fn test_save_and_load_preserves_state() {
        let issuer = AccountId::from_label("issuer");
        let minter = AccountId::from_label("minter");
        let alice = AccountId::from_label("alice");

        let mut ledger = TokenLedger::new();
        ledger.initialize_token(issuer, 6).unwrap();
        ledger.initialize_minter(minter).unwrap();
        ledger.initialize_balances(alice).unwrap();
        ledger.set_allowance(issuer, issuer, minter, 50).unwrap();
        ledger.mint_to(minter, issuer, alice, 20).unwrap();
        ledger.drop_progenitor(issuer).unwrap();

        let path = temp_file("roundtrip");
        save_ledger(&ledger, &path).unwrap();
        assert!(!temp_path(&path).exists());

        let loaded = load_ledger(&path).unwrap();
        assert_eq!(loaded.balance_of(&alice, &issuer), 20);
        assert_eq!(loaded.total_supply(&issuer).unwrap(), 20);
        assert_eq!(loaded.allowance_of(&minter, &issuer), 30);
        assert_eq!(loaded.progenitor_of(&issuer), None);
        assert!(loaded.has_balance_store(&alice));

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_unknown_version_rejected() {
        let snapshot = LedgerSnapshot {
            version: SNAPSHOT_VERSION + 1,
            ledger: TokenLedger::new(),
        };
        assert!(matches!(
            snapshot.into_ledger(),
            Err(CoinageError::Serialization(_))
        ));
    }

    #[test]
    fn test_corrupt_file_rejected() {
        let path = temp_file("corrupt");
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(&path, b"{ not json").unwrap();
        assert!(matches!(
            load_ledger(&path),
            Err(CoinageError::Serialization(_))
        ));
        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
