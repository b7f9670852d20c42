//! `delete-fixtures [--dry|-d] [--tier T]` - remove fixture records.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;
use storecheck_core::Tier;

#[derive(Parser)]
#[command(name = "delete-fixtures")]
#[command(author, version, about = "Delete storecheck fixture records from the target environment")]
struct Cli {
    /// List what would be deleted without deleting anything
    #[arg(short = 'd', long = "dry")]
    dry_run: bool,

    /// Delete only this tier's manifest fixtures instead of sweeping by pattern
    #[arg(long)]
    tier: Option<Tier>,
}

#[tokio::main]
async fn main() {
    storecheck_cli::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = storecheck_cli::commands::cleanup::delete_fixtures(cli.dry_run, cli.tier).await {
        tracing::error!("Cleanup failed: {e}");
        std::process::exit(1);
    }
}
