// crates/coinage-ledger/src/delegation.rs
//
// Delegation Registry: who may create new supply, and how much.
//
// Each token has one authorization record holding its progenitor capability
// as an `Option<AccountId>`. Initialization sets it to the token's authority;
// `drop_progenitor` clears it for good. Nothing else writes it, so there is
// never more than one holder and a dropped capability cannot come back.
//
// Minters opt in with `init_minter` and then hold a per-token allowance that
// the progenitor overwrites and minting consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use coinage_core::{AccountId, CoinageError, TokenId};

use crate::token::Amount;

/// Authorization state of a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAuthority {
    /// Current holder of the progenitor capability, `None` once dropped.
    pub progenitor: Option<AccountId>,
}

/// Remaining mint allowances of a single minter, keyed by token.
pub type MinterAllowances = BTreeMap<TokenId, Amount>;

/// Progenitor capabilities and minter allowances for every token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DelegationRegistry {
    authorities: BTreeMap<TokenId, TokenAuthority>,
    minters: BTreeMap<AccountId, MinterAllowances>,
}

impl DelegationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the progenitor capability for a freshly initialized token.
    ///
    /// Only reachable through `TokenLedger::initialize_token`.
    pub(crate) fn create_progenitor(&mut self, token: TokenId) -> Result<(), CoinageError> {
        if self.authorities.contains_key(&token) {
            return Err(CoinageError::AlreadyInitialized(format!(
                "progenitor capability for token {}",
                token
            )));
        }
        self.authorities.insert(
            token,
            TokenAuthority {
                progenitor: Some(token),
            },
        );
        Ok(())
    }

    /// Whether `token` ever had a progenitor capability, dropped or not.
    pub fn has_authority(&self, token: &TokenId) -> bool {
        self.authorities.contains_key(token)
    }

    /// Current progenitor of `token`, if any.
    pub fn progenitor_of(&self, token: &TokenId) -> Option<AccountId> {
        self.authorities.get(token).and_then(|auth| auth.progenitor)
    }

    /// Create the delegation registry entry for `account`.
    ///
    /// # Errors
    /// Returns `CoinageError::AlreadyInitialized` on repeat.
    pub fn init_minter(&mut self, account: AccountId) -> Result<(), CoinageError> {
        if self.minters.contains_key(&account) {
            return Err(CoinageError::AlreadyInitialized(format!(
                "delegation registry for minter {}",
                account
            )));
        }
        self.minters.insert(account, MinterAllowances::new());
        Ok(())
    }

    /// Whether `account` has a delegation registry entry.
    pub fn is_minter(&self, account: &AccountId) -> bool {
        self.minters.contains_key(account)
    }

    /// Set `minter`'s allowance for `token` to exactly `amount`.
    ///
    /// Overwrites rather than adds, so repeating a grant has no further effect.
    ///
    /// # Errors
    /// - `CoinageError::NotAuthorized` if `progenitor` does not currently hold
    ///   the capability for `token` (including after it was dropped).
    /// - `CoinageError::MinterNotInitialized` if `minter` never ran `init_minter`.
    pub fn set_allowance(
        &mut self,
        progenitor: &AccountId,
        token: &TokenId,
        minter: &AccountId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        if self.progenitor_of(token) != Some(*progenitor) {
            return Err(CoinageError::NotAuthorized(format!(
                "account {} does not hold the progenitor capability for token {}",
                progenitor, token
            )));
        }
        let allowances = self
            .minters
            .get_mut(minter)
            .ok_or(CoinageError::MinterNotInitialized(*minter))?;
        allowances.insert(*token, amount);
        Ok(())
    }

    /// Irrevocably destroy the progenitor capability held by `holder`.
    ///
    /// Existing allowances stay usable until exhausted.
    ///
    /// # Errors
    /// Returns `CoinageError::NotAuthorized` if `holder` holds no capability.
    pub fn drop_progenitor(&mut self, holder: &AccountId) -> Result<TokenId, CoinageError> {
        // The capability never moves, so the only token `holder` can hold it
        // for is the one keyed by its own address.
        let authority = self
            .authorities
            .get_mut(holder)
            .filter(|auth| auth.progenitor == Some(*holder))
            .ok_or_else(|| {
                CoinageError::NotAuthorized(format!(
                    "account {} holds no progenitor capability",
                    holder
                ))
            })?;
        authority.progenitor = None;
        Ok(*holder)
    }

    /// Remaining allowance of `minter` for `token`; 0 when there is no entry.
    pub fn allowance_of(&self, minter: &AccountId, token: &TokenId) -> Amount {
        self.minters
            .get(minter)
            .and_then(|allowances| allowances.get(token))
            .copied()
            .unwrap_or(0)
    }

    /// Check that `minter` can consume `amount` of its `token` allowance.
    ///
    /// Returns the allowance that would remain.
    ///
    /// # Errors
    /// - `CoinageError::NotAuthorized` if `minter` has no registry entry.
    /// - `CoinageError::AllowanceExceeded` if `amount` is above the remaining
    ///   allowance, or no allowance was ever granted for `token`.
    pub fn ensure_consume(
        &self,
        minter: &AccountId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<Amount, CoinageError> {
        let allowances = self.minters.get(minter).ok_or_else(|| {
            CoinageError::NotAuthorized(format!("account {} is not a registered minter", minter))
        })?;
        let available = allowances.get(token).copied();
        available
            .and_then(|current| current.checked_sub(amount))
            .ok_or(CoinageError::AllowanceExceeded {
                minter: *minter,
                token: *token,
                available: available.unwrap_or(0),
                requested: amount,
            })
    }

    /// Decrement `minter`'s allowance for `token` by `amount`.
    pub fn consume_allowance(
        &mut self,
        minter: &AccountId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        let remaining = self.ensure_consume(minter, token, amount)?;
        if let Some(entry) = self
            .minters
            .get_mut(minter)
            .and_then(|allowances| allowances.get_mut(token))
        {
            *entry = remaining;
        }
        Ok(())
    }
}
