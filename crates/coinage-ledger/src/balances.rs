// crates/coinage-ledger/src/balances.rs
//
// Ledger Store: per-account balances keyed by token.
//
// An account must be initialized once before it can hold anything. After
// that, the per-token record is created lazily on the first credit. Reads
// treat a missing record as a zero balance; debits treat it as an error, so
// "never funded" and "funded down to zero" stay distinguishable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use coinage_core::{AccountId, CoinageError, TokenId};

use crate::token::Amount;

/// All balances held by a single account, keyed by token.
pub type AccountBalances = BTreeMap<TokenId, Amount>;

/// Keyed store of every account's balance records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceStore {
    accounts: BTreeMap<AccountId, AccountBalances>,
}

impl BalanceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the balance store for `account`.
    ///
    /// # Errors
    /// Returns `CoinageError::AlreadyInitialized` if the account already has one.
    pub fn init_account(&mut self, account: AccountId) -> Result<(), CoinageError> {
        if self.accounts.contains_key(&account) {
            return Err(CoinageError::AlreadyInitialized(format!(
                "balance store for account {}",
                account
            )));
        }
        self.accounts.insert(account, AccountBalances::new());
        Ok(())
    }

    /// Whether `account` has been initialized for balances.
    pub fn is_initialized(&self, account: &AccountId) -> bool {
        self.accounts.contains_key(account)
    }

    /// Check that `credit(account, token, amount)` would succeed, without writing.
    ///
    /// # Errors
    /// - `CoinageError::NoBalanceRecord` if the account was never initialized.
    /// - `CoinageError::Overflow` if the new balance would exceed `u64::MAX`.
    pub fn ensure_credit(
        &self,
        account: &AccountId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        let balances = self
            .accounts
            .get(account)
            .ok_or(CoinageError::NoBalanceRecord {
                account: *account,
                token: *token,
            })?;
        let current = balances.get(token).copied().unwrap_or(0);
        current.checked_add(amount).ok_or_else(|| {
            CoinageError::Overflow(format!(
                "crediting {} to account {} (balance {}) for token {}",
                amount, account, current, token
            ))
        })?;
        Ok(())
    }

    /// Increase `account`'s balance for `token`, creating the record if absent.
    pub fn credit(
        &mut self,
        account: &AccountId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        self.ensure_credit(account, token, amount)?;
        let balances = self
            .accounts
            .get_mut(account)
            .ok_or(CoinageError::NoBalanceRecord {
                account: *account,
                token: *token,
            })?;
        let entry = balances.entry(*token).or_insert(0);
        *entry += amount;
        Ok(())
    }

    /// Check that `debit(account, token, amount)` would succeed, without writing.
    ///
    /// # Errors
    /// - `CoinageError::NoBalanceRecord` if there is no record for `token`.
    /// - `CoinageError::InsufficientBalance` if the balance is below `amount`.
    pub fn ensure_debit(
        &self,
        account: &AccountId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<Amount, CoinageError> {
        let current = self
            .accounts
            .get(account)
            .and_then(|balances| balances.get(token))
            .copied()
            .ok_or(CoinageError::NoBalanceRecord {
                account: *account,
                token: *token,
            })?;
        current
            .checked_sub(amount)
            .ok_or(CoinageError::InsufficientBalance {
                account: *account,
                token: *token,
                available: current,
                requested: amount,
            })
    }

    /// Decrease `account`'s balance for `token` by `amount`.
    ///
    /// The record is kept even when it reaches zero.
    pub fn debit(
        &mut self,
        account: &AccountId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        let remaining = self.ensure_debit(account, token, amount)?;
        if let Some(entry) = self
            .accounts
            .get_mut(account)
            .and_then(|balances| balances.get_mut(token))
        {
            *entry = remaining;
        }
        Ok(())
    }

    /// Balance of `account` for `token`, or 0 if there is no record.
    pub fn query(&self, account: &AccountId, token: &TokenId) -> Amount {
        self.accounts
            .get(account)
            .and_then(|balances| balances.get(token))
            .copied()
            .unwrap_or(0)
    }

    /// Whether `account` holds a record (possibly zero) for `token`.
    pub fn has_record(&self, account: &AccountId, token: &TokenId) -> bool {
        self.accounts
            .get(account)
            .is_some_and(|balances| balances.contains_key(token))
    }

    /// Sum of every account's balance for `token`, widened to avoid overflow.
    pub fn sum_for_token(&self, token: &TokenId) -> u128 {
        self.accounts
            .values()
            .filter_map(|balances| balances.get(token))
            .map(|&amount| amount as u128)
            .sum()
    }

    /// All `(account, balance)` records held for `token`.
    pub fn holders(&self, token: &TokenId) -> Vec<(AccountId, Amount)> {
        self.accounts
            .iter()
            .filter_map(|(account, balances)| balances.get(token).map(|&b| (*account, b)))
            .collect()
    }
}
