// crates/coinage-ledger/src/shared.rs
//
// SharedLedger: the ledger behind an async read/write lock.
//
// A mutating call holds the write lock for its whole duration and a query
// holds the read lock, so no call ever observes another call half-applied.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};

use coinage_core::{AccountId, CoinageError, TokenId};

use crate::ledger::TokenLedger;
use crate::snapshot::LedgerSnapshot;
use crate::token::Amount;

/// Cloneable handle to a ledger shared between tasks.
#[derive(Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<TokenLedger>>,
}

impl SharedLedger {
    /// Wrap an existing ledger.
    pub fn new(ledger: TokenLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub async fn initialize_token(&self, authority: AccountId, decimals: u8) -> Result<(), CoinageError> {
        self.inner.write().await.initialize_token(authority, decimals)
    }

    pub async fn initialize_balances(&self, account: AccountId) -> Result<(), CoinageError> {
        self.inner.write().await.initialize_balances(account)
    }

    pub async fn initialize_minter(&self, account: AccountId) -> Result<(), CoinageError> {
        self.inner.write().await.initialize_minter(account)
    }

    pub async fn set_allowance(
        &self,
        caller: AccountId,
        token: TokenId,
        minter: AccountId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        self.inner
            .write()
            .await
            .set_allowance(caller, token, minter, amount)
    }

    pub async fn drop_progenitor(&self, caller: AccountId) -> Result<(), CoinageError> {
        self.inner.write().await.drop_progenitor(caller)
    }

    pub async fn set_scaling_factor(
        &self,
        caller: AccountId,
        token: TokenId,
        factor: u64,
    ) -> Result<(), CoinageError> {
        self.inner.write().await.set_scaling_factor(caller, token, factor)
    }

    pub async fn transfer(
        &self,
        from: AccountId,
        token: TokenId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        self.inner.write().await.transfer(from, token, to, amount)
    }

    pub async fn mint_to(
        &self,
        minter: AccountId,
        token: TokenId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        self.inner.write().await.mint_to(minter, token, to, amount)
    }

    pub async fn burn(&self, from: AccountId, token: TokenId, amount: Amount) -> Result<(), CoinageError> {
        self.inner.write().await.burn(from, token, amount)
    }

    pub async fn balance_of(&self, account: AccountId, token: TokenId) -> Amount {
        self.inner.read().await.balance_of(&account, &token)
    }

    pub async fn total_supply(&self, token: TokenId) -> Result<Amount, CoinageError> {
        self.inner.read().await.total_supply(&token)
    }

    pub async fn scale_factor(&self, token: TokenId) -> Result<u64, CoinageError> {
        self.inner.read().await.scale_factor(&token)
    }

    pub async fn allowance_of(&self, minter: AccountId, token: TokenId) -> Amount {
        self.inner.read().await.allowance_of(&minter, &token)
    }

    /// Hold the read lock for a multi-step query.
    pub async fn read(&self) -> RwLockReadGuard<'_, TokenLedger> {
        self.inner.read().await
    }

    /// Consistent point-in-time copy of the whole ledger.
    pub async fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::capture(&*self.inner.read().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_mints_never_exceed_allowance() {
        let issuer = AccountId::from_label("issuer");
        let minter = AccountId::from_label("minter");
        let alice = AccountId::from_label("alice");

        let shared = SharedLedger::default();
        shared.initialize_token(issuer, 0).await.unwrap();
        shared.initialize_minter(minter).await.unwrap();
        shared.initialize_balances(alice).await.unwrap();
        shared.set_allowance(issuer, issuer, minter, 50).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..100 {
            let ledger = shared.clone();
            handles.push(tokio::spawn(async move {
                ledger.mint_to(minter, issuer, alice, 1).await.is_ok()
            }));
        }

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 50);
        assert_eq!(shared.balance_of(alice, issuer).await, 50);
        assert_eq!(shared.total_supply(issuer).await.unwrap(), 50);
        assert_eq!(shared.allowance_of(minter, issuer).await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_transfers_conserve_supply() {
        let issuer = AccountId::from_label("issuer");
        let minter = AccountId::from_label("minter");
        let accounts: Vec<AccountId> = (0..4)
            .map(|i| AccountId::from_label(&format!("acct-{}", i)))
            .collect();

        let shared = SharedLedger::default();
        shared.initialize_token(issuer, 0).await.unwrap();
        shared.initialize_minter(minter).await.unwrap();
        shared.set_allowance(issuer, issuer, minter, 400).await.unwrap();
        for account in &accounts {
            shared.initialize_balances(*account).await.unwrap();
            shared.mint_to(minter, issuer, *account, 100).await.unwrap();
        }

        let mut handles = Vec::new();
        for i in 0..40 {
            let ledger = shared.clone();
            let from = accounts[i % 4];
            let to = accounts[(i + 1) % 4];
            handles.push(tokio::spawn(async move {
                let _ = ledger.transfer(from, issuer, to, 7).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let snapshot = shared.snapshot().await;
        let ledger = snapshot.into_ledger().unwrap();
        ledger.audit_supply(&issuer).unwrap();
        assert_eq!(ledger.total_supply(&issuer).unwrap(), 400);
    }
}
