// crates/coinage-cli/src/commands/account.rs
//
// `coinage account {init, transfer, burn, balance, id}` — holder commands.

use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use coinage_ledger::format_amount;

use super::{resolve_account, resolve_or_caller, Session};
use crate::output::print_rows;

/// Account subcommands.
#[derive(Debug, Subcommand)]
pub enum AccountCmd {
    /// Create the caller's balance store.
    Init,
    /// Send tokens from the caller to another account.
    Transfer {
        /// Token id (label or hex).
        #[arg(long)]
        token: String,
        /// Recipient account (label or hex).
        #[arg(long)]
        to: String,
        /// Amount in unscaled units.
        #[arg(long)]
        amount: u64,
    },
    /// Destroy tokens from the caller's own balance.
    Burn {
        #[arg(long)]
        token: String,
        #[arg(long)]
        amount: u64,
    },
    /// Show an account's balance.
    Balance {
        #[arg(long)]
        token: String,
        /// Account to inspect (defaults to the caller).
        #[arg(long)]
        account: Option<String>,
    },
    /// Print the account id a label or hex string resolves to.
    Id {
        /// Label (e.g. "alice") or 64-char hex id.
        label: String,
    },
}

#[derive(Tabled, Serialize)]
struct BalanceRow {
    account: String,
    token: String,
    balance: u64,
    display: String,
}

/// Run the account subcommand.
pub async fn run(cmd: &AccountCmd, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let caller = session.caller;
    match cmd {
        AccountCmd::Init => {
            session.ledger.initialize_balances(caller).await?;
            session.commit().await?;
            println!("Balance store created for {}", caller);
        }
        AccountCmd::Transfer { token, to, amount } => {
            let token = resolve_account(token);
            let to = resolve_account(to);
            session.ledger.transfer(caller, token, to, *amount).await?;
            session.commit().await?;
            println!("Transferred {} to {}", amount, to);
        }
        AccountCmd::Burn { token, amount } => {
            let token = resolve_account(token);
            session.ledger.burn(caller, token, *amount).await?;
            session.commit().await?;
            println!("Burned {}", amount);
        }
        AccountCmd::Balance { token, account } => {
            let token = resolve_account(token);
            let account = resolve_or_caller(account.as_deref(), caller);
            let ledger = session.ledger.read().await;
            let balance = ledger.balance_of(&account, &token);
            // Unknown tokens still report a zero balance, just without a display unit.
            let display = match (ledger.scaled_balance_of(&account, &token), ledger.decimals(&token)) {
                (Ok(scaled), Ok(decimals)) => format_amount(scaled, decimals),
                _ => "-".to_string(),
            };
            let row = BalanceRow {
                account: account.to_string(),
                token: token.to_string(),
                balance,
                display,
            };
            print_rows(session.format, &[row]);
        }
        AccountCmd::Id { label } => {
            println!("{}", resolve_account(label));
        }
    }

    Ok(())
}
