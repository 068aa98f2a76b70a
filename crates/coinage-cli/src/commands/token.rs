// crates/coinage-cli/src/commands/token.rs
//
// `coinage token {init, grant, drop-progenitor, set-scaling-factor, info,
// holders, audit}` — token authority and supply commands.

use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use coinage_core::{AccountId, TokenId};
use coinage_ledger::{format_amount, scale, TokenLedger};

use super::{resolve_account, resolve_or_caller, Session};
use crate::output::print_rows;

/// Token subcommands.
#[derive(Debug, Subcommand)]
pub enum TokenCmd {
    /// Initialize a token owned by the caller; the caller becomes its progenitor.
    Init {
        /// Display precision.
        #[arg(long, default_value_t = 6)]
        decimals: u8,
    },
    /// Set a minter's allowance (progenitor only). Overwrites any previous value.
    Grant {
        /// Minter account (label or hex).
        #[arg(long)]
        minter: String,
        /// Allowance in unscaled units.
        #[arg(long)]
        amount: u64,
        /// Token id (defaults to the caller's own token).
        #[arg(long)]
        token: Option<String>,
    },
    /// Irrevocably give up the caller's progenitor capability.
    DropProgenitor,
    /// Rebase the display unit (token authority only). 10^12 is identity.
    SetScalingFactor {
        /// New fixed-point factor.
        #[arg(long)]
        factor: u64,
        /// Token id (defaults to the caller's own token).
        #[arg(long)]
        token: Option<String>,
    },
    /// Show supply, precision, scaling factor, and progenitor.
    Info {
        #[arg(long)]
        token: Option<String>,
    },
    /// List every account holding a record for the token.
    Holders {
        #[arg(long)]
        token: Option<String>,
    },
    /// Check that recorded supply equals the sum of balances.
    Audit {
        #[arg(long)]
        token: Option<String>,
    },
}

#[derive(Tabled, Serialize)]
struct TokenRow {
    token: String,
    decimals: u8,
    supply_unscaled: u64,
    scaling_factor: u64,
    supply_display: String,
    progenitor: String,
}

#[derive(Tabled, Serialize)]
struct HolderRow {
    account: String,
    balance: u64,
    display: String,
}

/// Run the token subcommand.
pub async fn run(cmd: &TokenCmd, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let caller = session.caller;
    match cmd {
        TokenCmd::Init { decimals } => {
            session.ledger.initialize_token(caller, *decimals).await?;
            session.commit().await?;
            println!("Token initialized: {}", caller);
            println!("  Decimals:   {}", decimals);
            println!("  Progenitor: {}", caller);
        }
        TokenCmd::Grant {
            minter,
            amount,
            token,
        } => {
            let token = resolve_or_caller(token.as_deref(), caller);
            let minter = resolve_account(minter);
            session
                .ledger
                .set_allowance(caller, token, minter, *amount)
                .await?;
            session.commit().await?;
            println!("Allowance for {} set to {}", minter, amount);
        }
        TokenCmd::DropProgenitor => {
            session.ledger.drop_progenitor(caller).await?;
            session.commit().await?;
            println!("Progenitor capability for {} dropped.", caller);
            println!("No further allowances can ever be granted for this token.");
        }
        TokenCmd::SetScalingFactor { factor, token } => {
            let token = resolve_or_caller(token.as_deref(), caller);
            session
                .ledger
                .set_scaling_factor(caller, token, *factor)
                .await?;
            session.commit().await?;
            println!("Scaling factor for {} set to {}", token, factor);
        }
        TokenCmd::Info { token } => {
            let token = resolve_or_caller(token.as_deref(), caller);
            let ledger = session.ledger.read().await;
            let row = token_row(&ledger, token)?;
            print_rows(session.format, &[row]);
        }
        TokenCmd::Holders { token } => {
            let token = resolve_or_caller(token.as_deref(), caller);
            let ledger = session.ledger.read().await;
            let record = ledger.mint_record(&token)?;
            let rows: Vec<HolderRow> = ledger
                .holders(&token)
                .into_iter()
                .map(|(account, balance)| HolderRow {
                    account: account.to_string(),
                    balance,
                    display: format_amount(scale(balance, record.scaling_factor), record.decimals),
                })
                .collect();
            print_rows(session.format, &rows);
        }
        TokenCmd::Audit { token } => {
            let token = resolve_or_caller(token.as_deref(), caller);
            let ledger = session.ledger.read().await;
            ledger.audit_supply(&token)?;
            println!(
                "Supply audit passed: {} units across {} holders",
                ledger.total_supply(&token)?,
                ledger.holders(&token).len()
            );
        }
    }

    Ok(())
}

fn token_row(ledger: &TokenLedger, token: TokenId) -> Result<TokenRow, coinage_core::CoinageError> {
    let record = ledger.mint_record(&token)?;
    Ok(TokenRow {
        token: token.to_string(),
        decimals: record.decimals,
        supply_unscaled: record.total_supply_unscaled,
        scaling_factor: record.scaling_factor,
        supply_display: format_amount(record.scaled_supply(), record.decimals),
        progenitor: ledger
            .progenitor_of(&token)
            .map(|p: AccountId| p.to_string())
            .unwrap_or_else(|| "dropped".to_string()),
    })
}
