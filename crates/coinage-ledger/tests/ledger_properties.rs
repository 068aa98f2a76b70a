// crates/coinage-ledger/tests/ledger_properties.rs
//
// Integration tests for the public ledger surface: supply conservation,
// transfer deltas, allowance exhaustion, progenitor revocation, identity
// scaling, and the full issue-transfer-burn lifecycle.

use coinage_core::{AccountId, CoinageError, TokenId};
use coinage_ledger::{scale, TokenLedger, IDENTITY_SCALING_FACTOR};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn account(label: &str) -> AccountId {
    AccountId::from_label(label)
}

fn issuer() -> TokenId {
    account("issuer")
}

fn minter() -> AccountId {
    account("minter")
}

/// A ledger with one token, one minter holding `allowance`, and `n` funded-ready accounts.
fn ledger_with_accounts(n: usize, allowance: u64) -> (TokenLedger, Vec<AccountId>) {
    let mut ledger = TokenLedger::new();
    ledger.initialize_token(issuer(), 6).unwrap();
    ledger.initialize_minter(minter()).unwrap();
    ledger
        .set_allowance(issuer(), issuer(), minter(), allowance)
        .unwrap();
    let accounts: Vec<AccountId> = (0..n).map(|i| account(&format!("holder-{}", i))).collect();
    for a in &accounts {
        ledger.initialize_balances(*a).unwrap();
    }
    (ledger, accounts)
}

fn sum_of_balances(ledger: &TokenLedger, accounts: &[AccountId], token: &TokenId) -> u64 {
    accounts.iter().map(|a| ledger.balance_of(a, token)).sum()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn supply_equals_sum_of_balances_across_mints_and_burns() {
    let (mut ledger, accounts) = ledger_with_accounts(5, 1_000_000);

    // Deterministic mixed sequence; failed calls must not disturb the invariant.
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    for step in 0..500 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let who = accounts[(seed % accounts.len() as u64) as usize];
        let amount = (seed >> 8) % 500;

        if step % 3 == 2 {
            let _ = ledger.burn(who, issuer(), amount);
        } else {
            let _ = ledger.mint_to(minter(), issuer(), who, amount);
        }

        assert_eq!(
            ledger.total_supply(&issuer()).unwrap(),
            sum_of_balances(&ledger, &accounts, &issuer())
        );
    }
    ledger.audit_supply(&issuer()).unwrap();
}

#[test]
fn transfer_applies_exact_deltas() {
    let (mut ledger, accounts) = ledger_with_accounts(2, 500);
    let (a, b) = (accounts[0], accounts[1]);
    ledger.mint_to(minter(), issuer(), a, 500).unwrap();

    for amt in [0u64, 1, 99, 200] {
        let before_a = ledger.balance_of(&a, &issuer());
        let before_b = ledger.balance_of(&b, &issuer());
        ledger.transfer(a, issuer(), b, amt).unwrap();
        assert_eq!(ledger.balance_of(&a, &issuer()), before_a - amt);
        assert_eq!(ledger.balance_of(&b, &issuer()), before_b + amt);
    }

    let before = ledger.balance_of(&a, &issuer());
    ledger.transfer(a, issuer(), a, before).unwrap();
    assert_eq!(ledger.balance_of(&a, &issuer()), before);
}

#[test]
fn overdraw_fails_and_leaves_balances_unchanged() {
    let (mut ledger, accounts) = ledger_with_accounts(2, 100);
    let (a, b) = (accounts[0], accounts[1]);
    ledger.mint_to(minter(), issuer(), a, 40).unwrap();
    ledger.mint_to(minter(), issuer(), b, 10).unwrap();

    let err = ledger.transfer(a, issuer(), b, 41).unwrap_err();
    assert!(matches!(
        err,
        CoinageError::InsufficientBalance {
            available: 40,
            requested: 41,
            ..
        }
    ));
    assert!(matches!(
        ledger.burn(b, issuer(), 11),
        Err(CoinageError::InsufficientBalance { .. })
    ));

    assert_eq!(ledger.balance_of(&a, &issuer()), 40);
    assert_eq!(ledger.balance_of(&b, &issuer()), 10);
    assert_eq!(ledger.total_supply(&issuer()).unwrap(), 50);
}

#[test]
fn minting_stops_when_allowance_is_exhausted() {
    let (mut ledger, accounts) = ledger_with_accounts(1, 10);
    let a = accounts[0];

    let mut last = ledger.allowance_of(&minter(), &issuer());
    for _ in 0..10 {
        ledger.mint_to(minter(), issuer(), a, 1).unwrap();
        let now = ledger.allowance_of(&minter(), &issuer());
        assert!(now < last);
        last = now;
    }
    assert_eq!(last, 0);

    assert!(matches!(
        ledger.mint_to(minter(), issuer(), a, 1),
        Err(CoinageError::AllowanceExceeded { .. })
    ));
    assert_eq!(ledger.allowance_of(&minter(), &issuer()), 0);
    assert_eq!(ledger.total_supply(&issuer()).unwrap(), 10);
}

#[test]
fn dropped_progenitor_blocks_all_future_grants() {
    let (mut ledger, accounts) = ledger_with_accounts(1, 5);
    let a = accounts[0];
    let second_minter = account("second-minter");
    ledger.initialize_minter(second_minter).unwrap();

    ledger.drop_progenitor(issuer()).unwrap();

    for caller in [issuer(), minter(), second_minter, a] {
        for target in [minter(), second_minter] {
            assert!(matches!(
                ledger.set_allowance(caller, issuer(), target, 1_000),
                Err(CoinageError::NotAuthorized(_))
            ));
        }
    }

    // Allowance granted before the drop is still spendable.
    ledger.mint_to(minter(), issuer(), a, 5).unwrap();
    assert!(ledger.mint_to(minter(), issuer(), a, 1).is_err());
}

#[test]
fn progenitor_of_one_token_cannot_grant_for_another() {
    let (mut ledger, _) = ledger_with_accounts(0, 0);
    let rival = account("rival-issuer");
    ledger.initialize_token(rival, 2).unwrap();

    assert!(matches!(
        ledger.set_allowance(rival, issuer(), minter(), 1),
        Err(CoinageError::NotAuthorized(_))
    ));
    ledger.set_allowance(rival, rival, minter(), 1).unwrap();
    assert_eq!(ledger.allowance_of(&minter(), &rival), 1);
    assert_eq!(ledger.allowance_of(&minter(), &issuer()), 0);
}

#[test]
fn identity_scaling_round_trips() {
    let samples = [0u64, 1, 2, 10, 1_000_000, 123_456_789_012_345, u64::MAX / 3, u64::MAX];
    for x in samples {
        assert_eq!(scale(x, IDENTITY_SCALING_FACTOR), x as u128);
    }
}

#[test]
fn queries_on_unknown_token() {
    let ledger = TokenLedger::new();
    let token = account("nobody");
    assert_eq!(ledger.balance_of(&account("alice"), &token), 0);
    assert!(matches!(ledger.total_supply(&token), Err(CoinageError::NotFound(_))));
    assert!(matches!(ledger.scale_factor(&token), Err(CoinageError::NotFound(_))));
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn issue_transfer_burn_lifecycle() {
    let token = issuer();
    let a = account("account-a");
    let b = account("account-b");

    let mut ledger = TokenLedger::new();
    ledger.initialize_token(token, 6).unwrap();
    ledger.initialize_minter(minter()).unwrap();
    ledger.initialize_balances(a).unwrap();
    ledger.initialize_balances(b).unwrap();
    ledger.set_allowance(token, token, minter(), 100).unwrap();

    ledger.mint_to(minter(), token, a, 100).unwrap();
    assert_eq!(ledger.balance_of(&a, &token), 100);
    assert_eq!(ledger.balance_of(&b, &token), 0);
    assert_eq!(ledger.allowance_of(&minter(), &token), 0);

    ledger.transfer(a, token, b, 100).unwrap();
    assert_eq!(ledger.balance_of(&a, &token), 0);
    assert_eq!(ledger.balance_of(&b, &token), 100);

    ledger.burn(b, token, 100).unwrap();
    assert_eq!(ledger.balance_of(&b, &token), 0);
    assert_eq!(ledger.total_supply(&token).unwrap(), 0);
    ledger.audit_supply(&token).unwrap();
}
