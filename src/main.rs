use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

mod cmd;
mod config;
mod send;
mod tap;
mod utils;

use cmd::{InfoArgs, ListArgs, SearchArgs, SendArgs};
use config::{AppConfig, ConnectionArgs};

/// tap-remote - Taproot Assets over SSH
///
/// Runs `tapcli` on a remote node through SSH and presents the result.
///
///   tap-remote list   [--json]
///   tap-remote info   <ASSET_ID>
///   tap-remote search <NAME> [--json]
///   tap-remote send   [--page-size N]     (interactive)
///
/// Connection settings come from flags, the environment or a `.env` file
/// in the working directory:
///   SSH_HOST  SSH_PORT  SSH_USERNAME  SSH_PRIVATE_KEY_PATH  SSH_PRIVATE_KEY_PASSPHRASE
///   TAPD_TLS_CERT_PATH  TAPD_RPC_SERVER  TAPD_NETWORK
///
/// Global flags:
///   -v / -vv        Increase verbosity (RUST_LOG overrides)
///   -q / --quiet    Errors only
#[derive(Parser, Debug)]
#[command(
    name = "tap-remote",
    version,
    author,
    about = "tap-remote - list, inspect and send Taproot Assets via tapcli over SSH",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all assets with name, supply and asset id
    List(ListArgs),

    /// Show detailed information for one asset
    Info(InfoArgs),

    /// Search assets by name (case-insensitive)
    Search(SearchArgs),

    /// Send an asset to another wallet (interactive)
    Send(SendArgs),
}

fn main() -> Result<()> {
    // .env must be loaded before clap reads env fallbacks
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    match dotenv {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded .env"),
        Ok(None) => {}
        Err(e) => tracing::warn!("ignoring unreadable .env: {e}"),
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = AppConfig::from_args(cli.connection);
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;

    rt.block_on(async {
        match command {
            Commands::List(args) => cmd::execute_list(args, &config).await,
            Commands::Info(args) => cmd::execute_info(args, &config).await,
            Commands::Search(args) => cmd::execute_search(args, &config).await,
            Commands::Send(args) => cmd::execute_send(args, &config).await,
        }
    })
}
