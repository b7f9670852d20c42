//! Manifest-driven teardown: delete-if-present for a tier's fixtures.

use storecheck_core::{FixtureKind, TierSelection};
use tracing::{debug, instrument};

use super::{CleanupReport, DeleteOutcome, Reconciler, apply_delete};
use crate::magento::CommerceApi;

impl<A: CommerceApi> Reconciler<'_, A> {
    /// Delete the selected fixtures that exist remotely.
    ///
    /// Coupons are removed through their owning sales rule. With `dry_run`
    /// set, lookups still run but no delete is issued.
    #[instrument(skip(self, selection), fields(tier = %selection.tier))]
    pub async fn teardown(&self, selection: &TierSelection<'_>, dry_run: bool) -> CleanupReport {
        let mut report = CleanupReport::new(dry_run);

        for product in &selection.products {
            let sku = product.sku.as_str();
            match self.api.find_product(sku).await {
                Ok(Some(_)) => {
                    let outcome = apply_delete(dry_run, self.api.delete_product(sku)).await;
                    report.record(FixtureKind::Product, sku, outcome);
                }
                Ok(None) => debug!(sku, "Product not present"),
                Err(e) => report.record(
                    FixtureKind::Product,
                    sku,
                    DeleteOutcome::Failed(format!("lookup failed: {e}")),
                ),
            }
        }

        for customer in &selection.customers {
            let email = customer.email.as_str();
            match self.api.find_customer(email).await {
                Ok(Some(remote)) => {
                    let outcome = apply_delete(dry_run, self.api.delete_customer(remote.id)).await;
                    report.record(FixtureKind::Customer, email, outcome);
                }
                Ok(None) => debug!(email, "Customer not present"),
                Err(e) => report.record(
                    FixtureKind::Customer,
                    email,
                    DeleteOutcome::Failed(format!("lookup failed: {e}")),
                ),
            }
        }

        for coupon in &selection.coupons {
            let code = coupon.code.as_str();
            match self.api.find_coupon(code).await {
                Ok(Some(remote)) => {
                    let outcome = apply_delete(dry_run, self.api.delete_rule(remote.rule_id)).await;
                    report.record(FixtureKind::Coupon, code, outcome);
                }
                Ok(None) => debug!(code, "Coupon not present"),
                Err(e) => report.record(
                    FixtureKind::Coupon,
                    code,
                    DeleteOutcome::Failed(format!("lookup failed: {e}")),
                ),
            }
        }

        report
    }
}
