//! `seed-all [A|B|C]` - create the fixtures of one tier.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;
use storecheck_core::Tier;

#[derive(Parser)]
#[command(name = "seed-all")]
#[command(author, version, about = "Seed storecheck fixtures into the target environment")]
struct Cli {
    /// Tier to seed (A, B or C). Defaults to `TEST_TIER`, else B.
    tier: Option<Tier>,
}

#[tokio::main]
async fn main() {
    storecheck_cli::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = storecheck_cli::commands::seed::seed_all(cli.tier).await {
        tracing::error!("Seeding failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_is_optional() {
        let cli = Cli::try_parse_from(["seed-all"]).unwrap();
        assert!(cli.tier.is_none());
    }

    #[test]
    fn test_lowercase_tier() {
        let cli = Cli::try_parse_from(["seed-all", "c"]).unwrap();
        assert_eq!(cli.tier, Some(Tier::C));
    }

    #[test]
    fn test_unknown_tier_rejected() {
        assert!(Cli::try_parse_from(["seed-all", "D"]).is_err());
    }
}
