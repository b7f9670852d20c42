//! Fixture reconciliation against the commerce platform.
//!
//! - **Seed**: create each selected fixture whose natural key is absent
//!   remotely; never update existing records.
//! - **Teardown**: delete exactly the selected fixtures that exist remotely.
//! - **Sweep**: delete every remote record matching the sweep patterns,
//!   whether or not it is in a manifest.
//!
//! Per-fixture failures are recorded in the report and never abort a run.

mod seed;
mod sweep;
mod teardown;

pub use seed::product_drift;

use chrono::{NaiveDate, Utc};
use storecheck_core::{FixtureKind, Tier};
use tracing::{info, warn};

use crate::config::SweepPatterns;
use crate::magento::{AdminApiError, CommerceApi};

/// Runs seed, teardown and sweep against one platform.
pub struct Reconciler<'a, A> {
    api: &'a A,
    patterns: &'a SweepPatterns,
    today: NaiveDate,
}

impl<'a, A: CommerceApi> Reconciler<'a, A> {
    #[must_use]
    pub fn new(api: &'a A, patterns: &'a SweepPatterns) -> Self {
        Self {
            api,
            patterns,
            today: Utc::now().date_naive(),
        }
    }

    /// Override the date coupon rules become valid from.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

// =============================================================================
// Seed reporting
// =============================================================================

/// What happened to one fixture during a seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created,
    AlreadyExists,
    /// The remote rejected the fixture or the call failed.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureOutcome {
    pub kind: FixtureKind,
    /// Natural key (SKU, email or coupon code).
    pub key: String,
    pub outcome: Outcome,
    /// Manifest/remote differences noticed on an existing record.
    pub drift: Vec<String>,
}

impl FixtureOutcome {
    fn new(kind: FixtureKind, key: &str, outcome: Outcome) -> Self {
        Self {
            kind,
            key: key.to_string(),
            outcome,
            drift: Vec::new(),
        }
    }
}

/// Result of seeding one tier.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub tier: Tier,
    pub outcomes: Vec<FixtureOutcome>,
}

impl SeedReport {
    #[must_use]
    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Created))
    }

    #[must_use]
    pub fn already_existed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::AlreadyExists))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    /// Outcomes for one kind, in the order they were processed.
    pub fn of_kind(&self, kind: FixtureKind) -> impl Iterator<Item = &FixtureOutcome> {
        self.outcomes.iter().filter(move |o| o.kind == kind)
    }

    /// Fixtures that exist remotely but differ from the manifest.
    pub fn drifted(&self) -> impl Iterator<Item = &FixtureOutcome> {
        self.outcomes.iter().filter(|o| !o.drift.is_empty())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.outcome)).count()
    }

    /// Emit one summary line per kind plus a total.
    pub fn log_summary(&self) {
        for kind in [FixtureKind::Product, FixtureKind::Customer, FixtureKind::Coupon] {
            let (mut created, mut skipped, mut failed) = (0, 0, 0);
            for outcome in self.of_kind(kind) {
                match outcome.outcome {
                    Outcome::Created => created += 1,
                    Outcome::AlreadyExists => skipped += 1,
                    Outcome::Failed(_) => failed += 1,
                }
            }
            info!(%kind, created, skipped, failed, "Seed summary");
        }

        for outcome in self.drifted() {
            warn!(kind = %outcome.kind, key = %outcome.key, drift = ?outcome.drift, "Existing fixture differs from manifest");
        }

        info!(
            tier = %self.tier,
            created = self.created(),
            skipped = self.already_existed(),
            failed = self.failed(),
            "Seeding complete"
        );
    }
}

// =============================================================================
// Cleanup reporting
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Dry run: the record matched and would have been deleted.
    WouldDelete,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRecord {
    pub kind: FixtureKind,
    /// SKU, email or rule name.
    pub key: String,
    pub outcome: DeleteOutcome,
}

/// Result of a sweep or teardown.
#[derive(Debug, Clone, Default)]
pub struct CleanupReport {
    pub dry_run: bool,
    pub records: Vec<DeleteRecord>,
    /// Lookups or searches that failed, so nothing of that kind was examined.
    pub search_failures: Vec<(FixtureKind, String)>,
}

impl CleanupReport {
    fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    fn record(&mut self, kind: FixtureKind, key: &str, outcome: DeleteOutcome) {
        self.records.push(DeleteRecord {
            kind,
            key: key.to_string(),
            outcome,
        });
    }

    #[must_use]
    pub fn deleted(&self) -> usize {
        self.count(|o| matches!(o, DeleteOutcome::Deleted))
    }

    #[must_use]
    pub fn would_delete(&self) -> usize {
        self.count(|o| matches!(o, DeleteOutcome::WouldDelete))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DeleteOutcome::Failed(_)))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.search_failures.is_empty()
    }

    fn count(&self, predicate: impl Fn(&DeleteOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(&r.outcome)).count()
    }

    pub fn log_summary(&self) {
        for (kind, error) in &self.search_failures {
            warn!(%kind, %error, "Search failed, nothing of this kind was deleted");
        }

        if self.dry_run {
            for record in &self.records {
                info!(kind = %record.kind, key = %record.key, "Would delete");
            }
            info!(would_delete = self.would_delete(), "Dry run complete");
        } else {
            info!(
                deleted = self.deleted(),
                failed = self.failed(),
                "Cleanup complete"
            );
        }
    }
}

/// Await `delete` unless this is a dry run.
///
/// `delete` is never polled on a dry run, so no request is sent.
async fn apply_delete<F>(dry_run: bool, delete: F) -> DeleteOutcome
where
    F: Future<Output = Result<(), AdminApiError>>,
{
    if dry_run {
        return DeleteOutcome::WouldDelete;
    }
    match delete.await {
        Ok(()) => DeleteOutcome::Deleted,
        Err(e) => {
            warn!(error = %e, "Delete failed");
            DeleteOutcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_report() -> SeedReport {
        SeedReport {
            tier: Tier::B,
            outcomes: vec![
                FixtureOutcome::new(FixtureKind::Product, "TEST_SIMPLE_001", Outcome::Created),
                FixtureOutcome::new(FixtureKind::Product, "TEST_SIMPLE_002", Outcome::AlreadyExists),
                FixtureOutcome::new(
                    FixtureKind::Customer,
                    "qa.default@storecheck.test",
                    Outcome::Failed("A customer with the same email address already exists.".to_string()),
                ),
                FixtureOutcome::new(FixtureKind::Coupon, "TEST10", Outcome::Created),
            ],
        }
    }

    #[test]
    fn test_seed_report_counts() {
        let report = seed_report();
        assert_eq!(report.created(), 2);
        assert_eq!(report.already_existed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        assert_eq!(report.of_kind(FixtureKind::Product).count(), 2);
    }

    #[test]
    fn test_seed_report_success_without_failures() {
        let mut report = seed_report();
        report.outcomes.retain(|o| !matches!(o.outcome, Outcome::Failed(_)));
        assert!(report.is_success());
        report.log_summary();
    }

    #[test]
    fn test_drifted_outcomes() {
        let mut report = seed_report();
        if let Some(existing) = report.outcomes.get_mut(1) {
            existing.drift.push("price: manifest 24.50, remote 20".to_string());
        }
        let drifted: Vec<_> = report.drifted().map(|o| o.key.as_str()).collect();
        assert_eq!(drifted, vec!["TEST_SIMPLE_002"]);
    }

    #[test]
    fn test_cleanup_report_counts() {
        let mut report = CleanupReport::new(false);
        report.record(FixtureKind::Product, "TEST_OLD_999", DeleteOutcome::Deleted);
        report.record(
            FixtureKind::Customer,
            "qa.default@storecheck.test",
            DeleteOutcome::Failed("boom".to_string()),
        );
        assert_eq!(report.deleted(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn test_search_failure_is_not_success() {
        let mut report = CleanupReport::new(true);
        report
            .search_failures
            .push((FixtureKind::Coupon, "HTTP 500".to_string()));
        assert!(!report.is_success());
        assert_eq!(report.would_delete(), 0);
    }
}
