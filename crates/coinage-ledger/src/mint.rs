// crates/coinage-ledger/src/mint.rs
//
// Mint Registry: one Mint Record per token, keyed by the authority account
// that initialized it.
//
// `total_supply_unscaled` tracks the sum of every outstanding balance for the
// token. `decimals` is fixed at creation. `scaling_factor` only affects what
// the query layer reports; accounting always uses unscaled amounts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use coinage_core::{AccountId, CoinageError, TokenId};

use crate::token::{scale, Amount, IDENTITY_SCALING_FACTOR};

/// Supply and display metadata for a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRecord {
    /// Sum of all outstanding unscaled balances for the token.
    pub total_supply_unscaled: Amount,
    /// Display precision. Immutable after creation.
    pub decimals: u8,
    /// Fixed-point display multiplier with a 10^12 denominator.
    pub scaling_factor: u64,
}

impl MintRecord {
    fn new(decimals: u8) -> Self {
        Self {
            total_supply_unscaled: 0,
            decimals,
            scaling_factor: IDENTITY_SCALING_FACTOR,
        }
    }

    /// Total supply converted with the current scaling factor.
    pub fn scaled_supply(&self) -> u128 {
        scale(self.total_supply_unscaled, self.scaling_factor)
    }
}

/// Registry of every token's Mint Record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MintRegistry {
    mints: BTreeMap<TokenId, MintRecord>,
}

impl MintRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `authority` can initialize a token.
    ///
    /// # Errors
    /// Returns `CoinageError::AlreadyInitialized` if a Mint Record already
    /// exists at that address.
    pub fn ensure_uninitialized(&self, authority: &AccountId) -> Result<(), CoinageError> {
        if self.mints.contains_key(authority) {
            return Err(CoinageError::AlreadyInitialized(format!(
                "mint record for token {}",
                authority
            )));
        }
        Ok(())
    }

    /// Create the Mint Record for the token owned by `authority`.
    ///
    /// The matching progenitor capability is created by the delegation
    /// registry; `TokenLedger::initialize_token` does both together.
    pub(crate) fn initialize_token(
        &mut self,
        authority: AccountId,
        decimals: u8,
    ) -> Result<(), CoinageError> {
        self.ensure_uninitialized(&authority)?;
        self.mints.insert(authority, MintRecord::new(decimals));
        Ok(())
    }

    /// Look up a token's Mint Record.
    ///
    /// # Errors
    /// Returns `CoinageError::NotFound` if the token was never initialized.
    pub fn get(&self, token: &TokenId) -> Result<&MintRecord, CoinageError> {
        self.mints
            .get(token)
            .ok_or_else(|| CoinageError::NotFound(format!("mint record for token {}", token)))
    }

    fn get_mut(&mut self, token: &TokenId) -> Result<&mut MintRecord, CoinageError> {
        self.mints
            .get_mut(token)
            .ok_or_else(|| CoinageError::NotFound(format!("mint record for token {}", token)))
    }

    /// Whether a Mint Record exists for `token`.
    pub fn contains(&self, token: &TokenId) -> bool {
        self.mints.contains_key(token)
    }

    /// Unscaled total supply of `token`.
    pub fn total_supply(&self, token: &TokenId) -> Result<Amount, CoinageError> {
        Ok(self.get(token)?.total_supply_unscaled)
    }

    /// Current scaling factor of `token`.
    pub fn scale_factor(&self, token: &TokenId) -> Result<u64, CoinageError> {
        Ok(self.get(token)?.scaling_factor)
    }

    /// Display precision of `token`.
    pub fn decimals(&self, token: &TokenId) -> Result<u8, CoinageError> {
        Ok(self.get(token)?.decimals)
    }

    /// Check that the supply of `token` can grow by `amount`.
    pub fn ensure_supply_increase(&self, token: &TokenId, amount: Amount) -> Result<(), CoinageError> {
        let record = self.get(token)?;
        record
            .total_supply_unscaled
            .checked_add(amount)
            .ok_or_else(|| {
                CoinageError::Overflow(format!(
                    "supply of token {} ({}) cannot grow by {}",
                    token, record.total_supply_unscaled, amount
                ))
            })?;
        Ok(())
    }

    pub(crate) fn increase_supply(&mut self, token: &TokenId, amount: Amount) -> Result<(), CoinageError> {
        self.ensure_supply_increase(token, amount)?;
        let record = self.get_mut(token)?;
        record.total_supply_unscaled += amount;
        Ok(())
    }

    /// Check that the supply of `token` can shrink by `amount`.
    ///
    /// Supply always equals the sum of balances, so a failure here means that
    /// invariant was already broken.
    pub fn ensure_supply_decrease(&self, token: &TokenId, amount: Amount) -> Result<(), CoinageError> {
        let record = self.get(token)?;
        record
            .total_supply_unscaled
            .checked_sub(amount)
            .ok_or_else(|| {
                CoinageError::InvariantViolation(format!(
                    "supply of token {} ({}) is below burned amount {}",
                    token, record.total_supply_unscaled, amount
                ))
            })?;
        Ok(())
    }

    pub(crate) fn decrease_supply(&mut self, token: &TokenId, amount: Amount) -> Result<(), CoinageError> {
        self.ensure_supply_decrease(token, amount)?;
        let record = self.get_mut(token)?;
        record.total_supply_unscaled -= amount;
        Ok(())
    }

    /// Replace the scaling factor of `token`.
    ///
    /// # Errors
    /// - `CoinageError::NotFound` if the token does not exist.
    /// - `CoinageError::NotAuthorized` if `authority` is not the token's address.
    /// - `CoinageError::InvalidScalingFactor` if `factor` is zero.
    pub fn set_scaling_factor(
        &mut self,
        authority: &AccountId,
        token: &TokenId,
        factor: u64,
    ) -> Result<(), CoinageError> {
        let record = self.get_mut(token)?;
        if authority != token {
            return Err(CoinageError::NotAuthorized(format!(
                "account {} is not the authority of token {}",
                authority, token
            )));
        }
        if factor == 0 {
            return Err(CoinageError::InvalidScalingFactor(factor));
        }
        record.scaling_factor = factor;
        Ok(())
    }

    /// Iterate over all tokens and their records.
    pub fn iter(&self) -> impl Iterator<Item = (&TokenId, &MintRecord)> {
        self.mints.iter()
    }
}
