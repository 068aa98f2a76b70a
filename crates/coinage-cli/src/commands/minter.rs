// crates/coinage-cli/src/commands/minter.rs
//
// `coinage minter {init, mint, allowance}` — delegated issuance commands.

use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use super::{resolve_account, resolve_or_caller, Session};
use crate::output::print_rows;

/// Minter subcommands.
#[derive(Debug, Subcommand)]
pub enum MinterCmd {
    /// Register the caller as a minter so it can receive allowances.
    Init,
    /// Mint new supply to an account, spending the caller's allowance.
    Mint {
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
    /// Show a minter's remaining allowance.
    Allowance {
        #[arg(long)]
        token: String,
        /// Minter account (defaults to the caller).
        #[arg(long)]
        minter: Option<String>,
    },
}

#[derive(Tabled, Serialize)]
struct AllowanceRow {
    minter: String,
    token: String,
    allowance: u64,
}

/// Run the minter subcommand.
pub async fn run(cmd: &MinterCmd, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let caller = session.caller;
    match cmd {
        MinterCmd::Init => {
            session.ledger.initialize_minter(caller).await?;
            session.commit().await?;
            println!("Minter registered: {}", caller);
        }
        MinterCmd::Mint { token, to, amount } => {
            let token = resolve_account(token);
            let to = resolve_account(to);
            session.ledger.mint_to(caller, token, to, *amount).await?;
            session.commit().await?;
            println!("Minted {} to {}", amount, to);
            println!(
                "  Remaining allowance: {}",
                session.ledger.allowance_of(caller, token).await
            );
        }
        MinterCmd::Allowance { token, minter } => {
            let token = resolve_account(token);
            let minter = resolve_or_caller(minter.as_deref(), caller);
            let row = AllowanceRow {
                minter: minter.to_string(),
                token: token.to_string(),
                allowance: session.ledger.allowance_of(minter, token).await,
            };
            print_rows(session.format, &[row]);
        }
    }

    Ok(())
}
