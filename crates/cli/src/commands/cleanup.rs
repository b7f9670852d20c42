//! Remove fixture records from the target environment.

use storecheck_admin::{AdminClient, CleanupReport, HarnessConfig, Reconciler};
use storecheck_core::Tier;
use tracing::info;

/// Delete seeded records.
///
/// Without `tier`, sweeps every remote record matching the sweep patterns.
/// With `tier`, deletes exactly that tier's manifest fixtures. `dry_run`
/// reports what would be deleted without deleting anything.
///
/// # Errors
///
/// Returns an error if configuration is missing, authentication fails, or
/// any search or delete failed.
pub async fn delete_fixtures(
    dry_run: bool,
    tier: Option<Tier>,
) -> Result<CleanupReport, Box<dyn std::error::Error>> {
    let config = HarnessConfig::from_env()?;
    // Manifests are validated before any remote call.
    let store = config.load_manifests()?;

    let client = AdminClient::connect(&config).await?;
    let reconciler = Reconciler::new(&client, &config.sweep);

    let report = if let Some(tier) = tier {
        info!(%tier, dry_run, "Tearing down tier fixtures");
        reconciler
            .teardown(&store.select_for_tier(tier), dry_run)
            .await
    } else {
        info!(
            dry_run,
            sku_prefix = %config.sweep.sku_prefix,
            email_domain = %config.sweep.email_domain,
            rule_prefix = %config.sweep.coupon_rule_prefix,
            "Sweeping fixture records"
        );
        reconciler.sweep(dry_run).await
    };
    report.log_summary();

    if !report.is_success() {
        return Err(format!(
            "cleanup incomplete: {} delete(s) failed, {} search(es) failed",
            report.failed(),
            report.search_failures.len()
        )
        .into());
    }

    Ok(report)
}
