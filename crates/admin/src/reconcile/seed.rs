//! Seed path: create-if-absent by natural key.

use storecheck_core::{
    CouponFixture, CustomerFixture, FixtureKind, ProductFixture, TierSelection,
};
use tracing::{debug, error, info, instrument, warn};

use super::{FixtureOutcome, Outcome, Reconciler, SeedReport};
use crate::magento::conversions::{convert_coupon, convert_customer, convert_product, convert_rule};
use crate::magento::{CommerceApi, RemoteProduct};

impl<A: CommerceApi> Reconciler<'_, A> {
    /// Create every fixture in `selection` that does not exist remotely.
    ///
    /// Products are seeded first, then customers, then coupons, each in
    /// manifest order. Existing records are left untouched.
    #[instrument(skip(self, selection), fields(tier = %selection.tier, fixtures = selection.total()))]
    pub async fn seed(&self, selection: &TierSelection<'_>) -> SeedReport {
        let mut outcomes = Vec::with_capacity(selection.total());

        for product in &selection.products {
            outcomes.push(self.seed_product(product).await);
        }
        for customer in &selection.customers {
            outcomes.push(self.seed_customer(customer).await);
        }
        for coupon in &selection.coupons {
            outcomes.push(self.seed_coupon(coupon).await);
        }

        SeedReport {
            tier: selection.tier,
            outcomes,
        }
    }

    async fn seed_product(&self, fixture: &ProductFixture) -> FixtureOutcome {
        let kind = FixtureKind::Product;
        let sku = fixture.sku.as_str();

        match self.api.find_product(sku).await {
            Ok(Some(remote)) => {
                debug!(sku, "Product already exists, skipping");
                let mut outcome = FixtureOutcome::new(kind, sku, Outcome::AlreadyExists);
                outcome.drift = product_drift(fixture, &remote);
                outcome
            }
            Ok(None) => match self.api.create_product(&convert_product(fixture)).await {
                Ok(created) => {
                    info!(sku, id = %created.id, "Created product");
                    FixtureOutcome::new(kind, sku, Outcome::Created)
                }
                Err(e) => failed(kind, sku, &e.to_string()),
            },
            Err(e) => failed(kind, sku, &format!("lookup failed: {e}")),
        }
    }

    async fn seed_customer(&self, fixture: &CustomerFixture) -> FixtureOutcome {
        let kind = FixtureKind::Customer;
        let email = fixture.email.as_str();

        match self.api.find_customer(email).await {
            Ok(Some(_)) => {
                debug!(email, "Customer already exists, skipping");
                FixtureOutcome::new(kind, email, Outcome::AlreadyExists)
            }
            Ok(None) => match self.api.create_customer(&convert_customer(fixture)).await {
                Ok(created) => {
                    info!(email, id = %created.id, "Created customer");
                    FixtureOutcome::new(kind, email, Outcome::Created)
                }
                Err(e) => failed(kind, email, &e.to_string()),
            },
            Err(e) => failed(kind, email, &format!("lookup failed: {e}")),
        }
    }

    /// Two dependent creates: the sales rule, then the coupon code bound to
    /// it. A failed code create deletes the rule again.
    async fn seed_coupon(&self, fixture: &CouponFixture) -> FixtureOutcome {
        let kind = FixtureKind::Coupon;
        let code = fixture.code.as_str();

        match self.api.find_coupon(code).await {
            Ok(Some(_)) => {
                debug!(code, "Coupon already exists, skipping");
                return FixtureOutcome::new(kind, code, Outcome::AlreadyExists);
            }
            Ok(None) => {}
            Err(e) => return failed(kind, code, &format!("lookup failed: {e}")),
        }

        let rule_payload = convert_rule(fixture, self.patterns.rule_name(code), self.today);
        let rule = match self.api.create_rule(&rule_payload).await {
            Ok(rule) => rule,
            Err(e) => return failed(kind, code, &format!("sales rule create failed: {e}")),
        };

        match self.api.create_coupon(&convert_coupon(rule.rule_id, code)).await {
            Ok(coupon) => {
                info!(code, rule_id = %rule.rule_id, coupon_id = %coupon.coupon_id, "Created coupon");
                FixtureOutcome::new(kind, code, Outcome::Created)
            }
            Err(create_err) => {
                let message = match self.api.delete_rule(rule.rule_id).await {
                    Ok(()) => {
                        warn!(code, rule_id = %rule.rule_id, "Removed sales rule after coupon create failed");
                        format!("coupon create failed: {create_err}; sales rule {} removed", rule.rule_id)
                    }
                    Err(undo_err) => {
                        error!(code, rule_id = %rule.rule_id, error = %undo_err, "Orphaned sales rule");
                        format!(
                            "coupon create failed: {create_err}; sales rule {} left behind: {undo_err}",
                            rule.rule_id
                        )
                    }
                };
                failed(kind, code, &message)
            }
        }
    }
}

fn failed(kind: FixtureKind, key: &str, message: &str) -> FixtureOutcome {
    warn!(%kind, key, error = message, "Fixture failed");
    FixtureOutcome::new(kind, key, Outcome::Failed(message.to_string()))
}

/// Differences between a product fixture and its existing remote record.
///
/// Only fields the remote reports are compared.
#[must_use]
pub fn product_drift(fixture: &ProductFixture, remote: &RemoteProduct) -> Vec<String> {
    let mut drift = Vec::new();

    if let Some(name) = &remote.name
        && name != &fixture.name
    {
        drift.push(format!("name: manifest {:?}, remote {name:?}", fixture.name));
    }
    if let Some(price) = remote.price
        && price != fixture.price
    {
        drift.push(format!("price: manifest {}, remote {price}", fixture.price));
    }

    drift
}
