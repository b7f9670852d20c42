//! Pattern sweep: delete every remote record that looks like a fixture.
//!
//! Searches use escaped `LIKE` patterns; each hit is re-checked locally
//! before deletion so a platform that treats `_` as a wildcard cannot widen
//! the match.

use storecheck_core::FixtureKind;
use tracing::{debug, instrument, warn};

use super::{CleanupReport, Reconciler, apply_delete};
use crate::magento::CommerceApi;

impl<A: CommerceApi> Reconciler<'_, A> {
    /// Delete remote products, customers and sales rules matching the
    /// sweep patterns, independent of manifest membership.
    ///
    /// A failed search is recorded and the other kinds are still swept.
    #[instrument(skip(self))]
    pub async fn sweep(&self, dry_run: bool) -> CleanupReport {
        let mut report = CleanupReport::new(dry_run);

        match self.api.search_products(&self.patterns.sku_like()).await {
            Ok(products) => {
                for product in products {
                    if !self.patterns.matches_sku(&product.sku) {
                        debug!(sku = %product.sku, "Search hit outside sweep prefix, ignoring");
                        continue;
                    }
                    let outcome = apply_delete(dry_run, self.api.delete_product(&product.sku)).await;
                    report.record(FixtureKind::Product, &product.sku, outcome);
                }
            }
            Err(e) => search_failed(&mut report, FixtureKind::Product, &e.to_string()),
        }

        match self.api.search_customers(&self.patterns.email_like()).await {
            Ok(customers) => {
                for customer in customers {
                    if !self.patterns.matches_email(&customer.email) {
                        debug!(email = %customer.email, "Search hit outside sweep domain, ignoring");
                        continue;
                    }
                    let outcome = apply_delete(dry_run, self.api.delete_customer(customer.id)).await;
                    report.record(FixtureKind::Customer, &customer.email, outcome);
                }
            }
            Err(e) => search_failed(&mut report, FixtureKind::Customer, &e.to_string()),
        }

        // Coupon codes go with their rule.
        match self.api.search_rules(&self.patterns.rule_like()).await {
            Ok(rules) => {
                for rule in rules {
                    if !self.patterns.matches_rule_name(&rule.name) {
                        debug!(name = %rule.name, "Search hit outside rule prefix, ignoring");
                        continue;
                    }
                    let outcome = apply_delete(dry_run, self.api.delete_rule(rule.rule_id)).await;
                    report.record(FixtureKind::Coupon, &rule.name, outcome);
                }
            }
            Err(e) => search_failed(&mut report, FixtureKind::Coupon, &e.to_string()),
        }

        report
    }
}

fn search_failed(report: &mut CleanupReport, kind: FixtureKind, error: &str) {
    warn!(%kind, error, "Sweep search failed");
    report.search_failures.push((kind, error.to_string()));
}
