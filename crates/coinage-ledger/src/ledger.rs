// crates/coinage-ledger/src/ledger.rs
//
// Ledger Operations: the public entry points.
//
// Each mutating entry point takes the already-authenticated caller first and
// runs every check before its first write. When a call returns an error the
// ledger is exactly as it was; when it returns Ok every step has been applied.

use serde::{Deserialize, Serialize};

use coinage_core::{AccountId, CoinageError, TokenId};

use crate::balances::BalanceStore;
use crate::delegation::DelegationRegistry;
use crate::mint::{MintRecord, MintRegistry};
use crate::token::{scale, Amount};

/// The complete ledger state: balances, mint records, and delegation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenLedger {
    pub(crate) balances: BalanceStore,
    pub(crate) mints: MintRegistry,
    pub(crate) delegation: DelegationRegistry,
}

impl TokenLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// Create a token owned by `authority` with the given display precision.
    ///
    /// The Mint Record and the progenitor capability are created together and
    /// both belong to `authority`.
    ///
    /// # Errors
    /// Returns `CoinageError::AlreadyInitialized` if `authority` already
    /// initialized a token.
    pub fn initialize_token(&mut self, authority: AccountId, decimals: u8) -> Result<(), CoinageError> {
        self.mints.ensure_uninitialized(&authority)?;
        if self.delegation.has_authority(&authority) {
            return Err(CoinageError::AlreadyInitialized(format!(
                "progenitor capability for token {}",
                authority
            )));
        }

        self.mints.initialize_token(authority, decimals)?;
        self.delegation.create_progenitor(authority)?;
        tracing::info!(
            "Token {} initialized with {} decimals",
            authority.short(),
            decimals
        );
        Ok(())
    }

    /// Create the balance store for `account`. Runs once per account.
    pub fn initialize_balances(&mut self, account: AccountId) -> Result<(), CoinageError> {
        self.balances.init_account(account)?;
        tracing::info!("Balance store initialized for {}", account.short());
        Ok(())
    }

    /// Create the delegation registry entry for `account`. Runs once per account.
    pub fn initialize_minter(&mut self, account: AccountId) -> Result<(), CoinageError> {
        self.delegation.init_minter(account)?;
        tracing::info!("Minter registry initialized for {}", account.short());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Delegation
    // -----------------------------------------------------------------------

    /// Set `minter`'s allowance for `token` to `amount`. Caller must hold the
    /// token's progenitor capability.
    pub fn set_allowance(
        &mut self,
        caller: AccountId,
        token: TokenId,
        minter: AccountId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        self.delegation.set_allowance(&caller, &token, &minter, amount)?;
        tracing::info!(
            "Allowance for minter {} on token {} set to {}",
            minter.short(),
            token.short(),
            amount
        );
        Ok(())
    }

    /// Permanently destroy the progenitor capability held by `caller`.
    pub fn drop_progenitor(&mut self, caller: AccountId) -> Result<(), CoinageError> {
        let token = self.delegation.drop_progenitor(&caller)?;
        tracing::info!(
            "Progenitor capability for token {} dropped; no further allowances can be granted",
            token.short()
        );
        Ok(())
    }

    /// Rebase the display unit of `token`. Caller must be the token authority.
    pub fn set_scaling_factor(
        &mut self,
        caller: AccountId,
        token: TokenId,
        factor: u64,
    ) -> Result<(), CoinageError> {
        self.mints.set_scaling_factor(&caller, &token, factor)?;
        tracing::info!("Scaling factor for token {} set to {}", token.short(), factor);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Value movement
    // -----------------------------------------------------------------------

    /// Move `amount` of `token` from `from` to `to`.
    ///
    /// Self-transfers succeed as a no-op provided `from` could have paid.
    ///
    /// # Errors
    /// - `CoinageError::NoBalanceRecord` if `from` has no record for `token`,
    ///   or `to` has no balance store.
    /// - `CoinageError::InsufficientBalance` if `from` holds less than `amount`.
    /// - `CoinageError::Overflow` if `to`'s balance would overflow.
    pub fn transfer(
        &mut self,
        from: AccountId,
        token: TokenId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        self.balances.ensure_debit(&from, &token, amount)?;
        if from == to {
            tracing::debug!("Self-transfer of {} by {} is a no-op", amount, from.short());
            return Ok(());
        }
        self.balances.ensure_credit(&to, &token, amount)?;

        self.balances.debit(&from, &token, amount)?;
        self.balances.credit(&to, &token, amount)?;
        tracing::info!(
            "Transferred {} of token {} from {} to {}",
            amount,
            token.short(),
            from.short(),
            to.short()
        );
        Ok(())
    }

    /// Create `amount` of `token` in `to`'s balance, spending `minter`'s allowance.
    ///
    /// Allowance, balance, and supply change together or not at all.
    ///
    /// # Errors
    /// - `CoinageError::NotFound` if `token` does not exist.
    /// - `CoinageError::NotAuthorized` if `minter` has no registry entry.
    /// - `CoinageError::AllowanceExceeded` if the allowance is too small.
    /// - `CoinageError::NoBalanceRecord` if `to` has no balance store.
    /// - `CoinageError::Overflow` if the balance or supply would overflow.
    pub fn mint_to(
        &mut self,
        minter: AccountId,
        token: TokenId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), CoinageError> {
        self.mints.get(&token)?;
        self.delegation.ensure_consume(&minter, &token, amount)?;
        self.balances.ensure_credit(&to, &token, amount)?;
        self.mints.ensure_supply_increase(&token, amount)?;

        self.delegation.consume_allowance(&minter, &token, amount)?;
        self.balances.credit(&to, &token, amount)?;
        self.mints.increase_supply(&token, amount)?;
        tracing::info!(
            "Minter {} minted {} of token {} to {}",
            minter.short(),
            amount,
            token.short(),
            to.short()
        );
        Ok(())
    }

    /// Destroy `amount` of `token` from `from`'s own balance. Unprivileged.
    ///
    /// # Errors
    /// - `CoinageError::NotFound` if `token` does not exist.
    /// - `CoinageError::NoBalanceRecord` / `CoinageError::InsufficientBalance`
    ///   as for a debit.
    pub fn burn(&mut self, from: AccountId, token: TokenId, amount: Amount) -> Result<(), CoinageError> {
        self.mints.get(&token)?;
        self.balances.ensure_debit(&from, &token, amount)?;
        self.mints.ensure_supply_decrease(&token, amount)?;

        self.balances.debit(&from, &token, amount)?;
        self.mints.decrease_supply(&token, amount)?;
        tracing::info!("Burned {} of token {} from {}", amount, token.short(), from.short());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Unscaled balance of `account` for `token`; 0 if never funded.
    pub fn balance_of(&self, account: &AccountId, token: &TokenId) -> Amount {
        self.balances.query(account, token)
    }

    /// Unscaled total supply of `token`.
    pub fn total_supply(&self, token: &TokenId) -> Result<Amount, CoinageError> {
        self.mints.total_supply(token)
    }

    /// Current scaling factor of `token`.
    pub fn scale_factor(&self, token: &TokenId) -> Result<u64, CoinageError> {
        self.mints.scale_factor(token)
    }

    /// Display precision of `token`.
    pub fn decimals(&self, token: &TokenId) -> Result<u8, CoinageError> {
        self.mints.decimals(token)
    }

    /// Full Mint Record of `token`.
    pub fn mint_record(&self, token: &TokenId) -> Result<&MintRecord, CoinageError> {
        self.mints.get(token)
    }

    /// Remaining allowance of `minter` for `token`; 0 if none was granted.
    pub fn allowance_of(&self, minter: &AccountId, token: &TokenId) -> Amount {
        self.delegation.allowance_of(minter, token)
    }

    /// Current progenitor of `token`, `None` if dropped or never created.
    pub fn progenitor_of(&self, token: &TokenId) -> Option<AccountId> {
        self.delegation.progenitor_of(token)
    }

    /// Balance of `account` converted with `token`'s scaling factor.
    pub fn scaled_balance_of(&self, account: &AccountId, token: &TokenId) -> Result<u128, CoinageError> {
        let factor = self.mints.scale_factor(token)?;
        Ok(scale(self.balances.query(account, token), factor))
    }

    /// Total supply converted with `token`'s scaling factor.
    pub fn scaled_total_supply(&self, token: &TokenId) -> Result<u128, CoinageError> {
        Ok(self.mints.get(token)?.scaled_supply())
    }

    /// Every `(account, balance)` record held for `token`.
    pub fn holders(&self, token: &TokenId) -> Vec<(AccountId, Amount)> {
        self.balances.holders(token)
    }

    /// Whether `account` has run `initialize_balances`.
    pub fn has_balance_store(&self, account: &AccountId) -> bool {
        self.balances.is_initialized(account)
    }

    /// Whether `account` has run `initialize_minter`.
    pub fn is_minter(&self, account: &AccountId) -> bool {
        self.delegation.is_minter(account)
    }

    /// Iterate over every token and its Mint Record.
    pub fn tokens(&self) -> impl Iterator<Item = (&TokenId, &MintRecord)> {
        self.mints.iter()
    }

    /// Verify that `token`'s recorded supply equals the sum of its balances.
    ///
    /// # Errors
    /// - `CoinageError::NotFound` if `token` does not exist.
    /// - `CoinageError::InvariantViolation` on mismatch.
    pub fn audit_supply(&self, token: &TokenId) -> Result<(), CoinageError> {
        let supply = self.mints.total_supply(token)?;
        let sum = self.balances.sum_for_token(token);
        if sum != supply as u128 {
            tracing::error!(
                "Supply mismatch for token {}: recorded {} but balances sum to {}",
                token.short(),
                supply,
                sum
            );
            return Err(CoinageError::InvariantViolation(format!(
                "token {} records supply {} but balances sum to {}",
                token, supply, sum
            )));
        }
        tracing::debug!("Supply audit passed for token {} ({})", token.short(), supply);
        Ok(())
    }
}
