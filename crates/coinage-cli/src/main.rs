// crates/coinage-cli/src/main.rs
//
// CLI entrypoint for the Coinage ledger developer tools.
//
// Acts as a minimal host: loads the ledger snapshot, runs exactly one entry
// point as the given caller, and writes the snapshot back only when that
// entry point succeeded.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use commands::account::AccountCmd;
use commands::minter::MinterCmd;
use commands::token::TokenCmd;
use commands::{resolve_account, Session};
use config::CliConfig;
use output::OutputFormat;

use coinage_ledger::{load_ledger, SharedLedger};

/// Coinage CLI — capability-gated token ledger.
#[derive(Parser, Debug)]
#[command(
    name = "coinage",
    version = "0.1.0",
    about = "Coinage ledger CLI — issue, delegate, mint, transfer, and burn tokens"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.coinage/config.toml")]
    config: String,

    /// Ledger snapshot path (overrides the config file).
    #[arg(long, global = true)]
    state: Option<String>,

    /// Caller identity: a label (e.g. "alice") or a 64-char hex account id.
    #[arg(long, global = true, default_value = "default")]
    caller: String,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Token authority: initialize, grant allowances, drop progenitor, rebase, inspect.
    #[command(subcommand)]
    Token(TokenCmd),

    /// Delegated minting: register, mint, inspect allowance.
    #[command(subcommand)]
    Minter(MinterCmd),

    /// Holder operations: initialize, transfer, burn, balance.
    #[command(subcommand)]
    Account(AccountCmd),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut cli_config, config_error) = match CliConfig::load(&cli.config) {
        Ok(cfg) => (cfg, None),
        Err(e) => (CliConfig::default(), Some(e.to_string())),
    };

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli_config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match config_error {
        None => tracing::debug!("Loaded configuration from {}", cli.config),
        Some(e) => tracing::debug!(
            "Could not load config from {}: {}. Using defaults.",
            cli.config,
            e
        ),
    }

    if let Some(state) = &cli.state {
        cli_config.state_path = state.clone();
    }
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::from_config(&cli_config.output)
    };

    let state_path = cli_config.state_path();
    let ledger = load_ledger(&state_path)?;
    let session = Session {
        caller: resolve_account(&cli.caller),
        ledger: SharedLedger::new(ledger),
        state_path,
        format,
    };
    tracing::debug!("Caller {} using {}", session.caller, session.state_path.display());

    let result = match &cli.command {
        Commands::Token(cmd) => commands::token::run(cmd, &session).await,
        Commands::Minter(cmd) => commands::minter::run(cmd, &session).await,
        Commands::Account(cmd) => commands::account::run(cmd, &session).await,
    };

    if let Err(e) = &result {
        tracing::warn!("Operation rejected for caller {}: {}", session.caller.short(), e);
    }
    result
}
