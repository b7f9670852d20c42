//! Seed the fixtures of one tier into the target environment.

use storecheck_admin::{AdminClient, HarnessConfig, Outcome, Reconciler, SeedReport};
use storecheck_core::Tier;
use tracing::{error, info};

/// Seed every fixture selected for `tier` (default: `TEST_TIER`, else B).
///
/// Configuration and manifests are validated before any remote call.
///
/// # Errors
///
/// Returns an error if configuration is missing, the manifests are invalid,
/// authentication fails, or any fixture could not be created.
pub async fn seed_all(tier: Option<Tier>) -> Result<SeedReport, Box<dyn std::error::Error>> {
    let config = HarnessConfig::from_env()?;
    let tier = tier.unwrap_or(config.tier);
    let store = config.load_manifests()?;
    let selection = store.select_for_tier(tier);

    info!(
        %tier,
        base_url = %config.base_url,
        products = selection.products.len(),
        customers = selection.customers.len(),
        coupons = selection.coupons.len(),
        "Seeding fixtures"
    );

    let client = AdminClient::connect(&config).await?;
    info!("Authenticated with admin API");

    let report = Reconciler::new(&client, &config.sweep)
        .seed(&selection)
        .await;
    report.log_summary();

    if !report.is_success() {
        error!("Failed fixtures:");
        for outcome in &report.outcomes {
            if let Outcome::Failed(message) = &outcome.outcome {
                error!("  - {} {}: {message}", outcome.kind, outcome.key);
            }
        }
        return Err(format!("{} fixture(s) failed to seed", report.failed()).into());
    }

    Ok(report)
}
