//! Account level claim history and benefit usage.
//!
//! Lives outside the wizard session: starting over clears the draft claim,
//! not the claims already filed.

use chrono::{Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{info, warn};

use crate::estimator::Estimate;
use crate::models::{ClaimCategory, ClaimFor, CoverageBucket, Receipt};

const DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    Submitted,
    InReview,
    Approved,
    Denied,
    Paid,
}

impl ClaimStatus {
    pub fn label(self) -> &'static str {
        match self {
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::InReview => "Processing",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Denied => "Denied",
            ClaimStatus::Paid => "Paid",
        }
    }

    /// Submitted → InReview → Approved | Denied, Approved → Paid
    pub fn can_become(self, next: ClaimStatus) -> bool {
        matches!(
            (self, next),
            (ClaimStatus::Submitted, ClaimStatus::InReview)
                | (ClaimStatus::InReview, ClaimStatus::Approved)
                | (ClaimStatus::InReview, ClaimStatus::Denied)
                | (ClaimStatus::Approved, ClaimStatus::Paid)
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ClaimError {
    #[error("claim #{0} not found")]
    NotFound(u32),
    #[error("claim #{id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: u32,
        from: ClaimStatus,
        to: ClaimStatus,
    },
    #[error("covered amount {0} is not a finite non-negative number")]
    InvalidAmount(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: u32,
    /// `CLM-NNNN`, only for claims filed through the wizard
    pub reference: Option<String>,
    pub category: ClaimCategory,
    pub claim_for: ClaimFor,
    pub date: String,
    pub amount: f64,
    pub status: ClaimStatus,
    pub covered_amount: f64,
    pub estimate: Option<Estimate>,
    pub provider_name: Option<String>,
    pub service_date: Option<String>,
    pub physio_type: Option<String>,
    #[serde(default)]
    pub receipts: Vec<Receipt>,
}

impl ClaimRecord {
    pub fn amount_label(&self) -> String {
        format!("${:.2}", self.amount)
    }
}

/// Everything the review screen knows about a claim about to be filed
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaim {
    pub category: ClaimCategory,
    pub claim_for: ClaimFor,
    pub amount: f64,
    pub estimate: Estimate,
    pub provider_name: String,
    pub service_date: String,
    pub physio_type: Option<String>,
    pub receipts: Vec<Receipt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageUsage {
    pub used: f64,
    pub total: f64,
}

impl CoverageUsage {
    pub fn remaining(&self) -> f64 {
        (self.total - self.used).max(0.0)
    }

    pub fn percent_used(&self) -> f64 {
        if self.total > 0.0 {
            self.used / self.total * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageLedger {
    pub dental: CoverageUsage,
    pub vision: CoverageUsage,
    pub paramedical: CoverageUsage,
}

impl CoverageLedger {
    /// Annual plan maximums, nothing used yet
    pub fn fresh() -> Self {
        let limit = |total| CoverageUsage { used: 0.0, total };
        Self {
            dental: limit(2000.0),
            vision: limit(500.0),
            paramedical: limit(1000.0),
        }
    }

    pub fn bucket(&self, bucket: CoverageBucket) -> &CoverageUsage {
        match bucket {
            CoverageBucket::Dental => &self.dental,
            CoverageBucket::Vision => &self.vision,
            CoverageBucket::Paramedical => &self.paramedical,
        }
    }

    fn bucket_mut(&mut self, bucket: CoverageBucket) -> &mut CoverageUsage {
        match bucket {
            CoverageBucket::Dental => &mut self.dental,
            CoverageBucket::Vision => &mut self.vision,
            CoverageBucket::Paramedical => &mut self.paramedical,
        }
    }

    /// Add to a bucket's usage. Usage may exceed the plan total.
    pub fn charge(&mut self, bucket: CoverageBucket, amount: f64) {
        let usage = self.bucket_mut(bucket);
        usage.used += amount;
        if usage.used > usage.total {
            warn!(
                bucket = bucket.name(),
                used = usage.used,
                total = usage.total,
                "coverage usage exceeds plan total"
            );
        }
    }
}

#[derive(Debug)]
struct LedgerState {
    /// Newest first
    claims: Vec<ClaimRecord>,
    coverage: CoverageLedger,
}

/// Claims filed on the account and the benefits they used
#[derive(Debug)]
pub struct ClaimsLedger {
    state: Mutex<LedgerState>,
}

impl ClaimsLedger {
    pub fn new(claims: Vec<ClaimRecord>, coverage: CoverageLedger) -> Self {
        Self {
            state: Mutex::new(LedgerState { claims, coverage }),
        }
    }

    /// No claims filed, full plan available
    pub fn empty() -> Self {
        Self::new(Vec::new(), CoverageLedger::fresh())
    }

    /// Account as it looks in the demo: one approved dental claim and a
    /// prescription still in review.
    pub fn with_demo_data() -> Self {
        let seed = |id, category, date: &str, amount, status, covered_amount| ClaimRecord {
            id,
            reference: None,
            category,
            claim_for: ClaimFor::Myself,
            date: date.to_string(),
            amount,
            status,
            covered_amount,
            estimate: None,
            provider_name: None,
            service_date: None,
            physio_type: None,
            receipts: Vec::new(),
        };

        let claims = vec![
            seed(1, ClaimCategory::Dental, "Nov 20, 2025", 185.0, ClaimStatus::Approved, 185.0),
            seed(2, ClaimCategory::Drug, "Nov 15, 2025", 42.5, ClaimStatus::InReview, 0.0),
        ];
        let mut coverage = CoverageLedger::fresh();
        coverage.dental.used = 185.0;
        coverage.vision.used = 150.0;
        coverage.paramedical.used = 320.0;

        Self::new(claims, coverage)
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// File a claim dated today
    pub fn submit(&self, claim: NewClaim) -> ClaimRecord {
        self.submit_on(claim, Local::now().date_naive())
    }

    /// File a claim with an explicit filing date.
    ///
    /// The record enters review straight away with nothing covered yet; the
    /// estimated coverage is charged to the category's benefit bucket.
    pub fn submit_on(&self, claim: NewClaim, date: NaiveDate) -> ClaimRecord {
        let mut state = self.lock();

        let record = ClaimRecord {
            id: state.claims.len() as u32 + 1,
            reference: Some(format!("CLM-{}", rand::rng().random_range(1000..=9999))),
            category: claim.category,
            claim_for: claim.claim_for,
            date: date.format(DATE_FORMAT).to_string(),
            amount: claim.amount,
            status: ClaimStatus::InReview,
            covered_amount: 0.0,
            provider_name: Some(claim.provider_name),
            service_date: Some(claim.service_date),
            physio_type: claim.physio_type,
            receipts: claim.receipts,
            estimate: Some(claim.estimate),
        };

        if let Some(estimate) = &record.estimate {
            state
                .coverage
                .charge(record.category.coverage_bucket(), estimate.estimated_coverage);
        }
        state.claims.insert(0, record.clone());

        info!(
            claim_id = record.id,
            reference = record.reference.as_deref().unwrap_or_default(),
            category = record.category.id(),
            amount = record.amount,
            "claim submitted"
        );
        record
    }

    fn update_claim(
        &self,
        id: u32,
        update: impl FnOnce(&mut ClaimRecord) -> Result<(), ClaimError>,
    ) -> Result<ClaimRecord, ClaimError> {
        let mut state = self.lock();
        let record = state
            .claims
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(ClaimError::NotFound(id))?;
        update(record)?;
        Ok(record.clone())
    }

    /// Move a claim along its status machine
    pub fn transition(&self, id: u32, next: ClaimStatus) -> Result<ClaimRecord, ClaimError> {
        self.update_claim(id, |record| {
            if !record.status.can_become(next) {
                return Err(ClaimError::InvalidTransition {
                    id,
                    from: record.status,
                    to: next,
                });
            }
            info!(claim_id = id, from = %record.status, to = %next, "claim status changed");
            record.status = next;
            Ok(())
        })
    }

    /// Approve a claim in review and record what the plan pays
    pub fn approve(&self, id: u32, covered_amount: f64) -> Result<ClaimRecord, ClaimError> {
        if !covered_amount.is_finite() || covered_amount < 0.0 {
            return Err(ClaimError::InvalidAmount(covered_amount));
        }
        self.update_claim(id, |record| {
            if !record.status.can_become(ClaimStatus::Approved) {
                return Err(ClaimError::InvalidTransition {
                    id,
                    from: record.status,
                    to: ClaimStatus::Approved,
                });
            }
            info!(claim_id = id, covered_amount, "claim approved");
            record.status = ClaimStatus::Approved;
            record.covered_amount = covered_amount;
            Ok(())
        })
    }

    /// Claims newest first
    pub fn claims(&self) -> Vec<ClaimRecord> {
        self.lock().claims.clone()
    }

    pub fn claim(&self, id: u32) -> Option<ClaimRecord> {
        self.lock().claims.iter().find(|record| record.id == id).cloned()
    }

    pub fn coverage(&self) -> CoverageLedger {
        self.lock().coverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::estimate;

    fn vision_claim(amount: f64) -> NewClaim {
        NewClaim {
            category: ClaimCategory::Vision,
            claim_for: ClaimFor::Spouse,
            amount,
            estimate: estimate(amount),
            provider_name: "Clear Sight Optometry".to_string(),
            service_date: "2025-11-28".to_string(),
            physio_type: None,
            receipts: vec![],
        }
    }

    #[test]
    fn demo_account_matches_dashboard() {
        let ledger = ClaimsLedger::with_demo_data();
        let claims = ledger.claims();

        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].category.record_name(), "Dental");
        assert_eq!(claims[0].amount_label(), "$185.00");
        assert_eq!(claims[0].status.label(), "Approved");
        assert_eq!(claims[1].category.record_name(), "Prescription");
        assert_eq!(claims[1].amount_label(), "$42.50");
        assert_eq!(claims[1].status.label(), "Processing");

        let coverage = ledger.coverage();
        assert_eq!(coverage.dental, CoverageUsage { used: 185.0, total: 2000.0 });
        assert_eq!(coverage.paramedical.remaining(), 680.0);
    }

    #[test]
    fn submission_prepends_and_charges_bucket() {
        let ledger = ClaimsLedger::with_demo_data();
        let date = NaiveDate::from_ymd_opt(2025, 12, 3).unwrap();
        let record = ledger.submit_on(vision_claim(250.0), date);

        assert_eq!(record.id, 3);
        assert_eq!(record.date, "Dec 3, 2025");
        assert_eq!(record.status, ClaimStatus::InReview);
        assert_eq!(record.covered_amount, 0.0);

        let reference = record.reference.unwrap();
        let digits: u32 = reference.strip_prefix("CLM-").unwrap().parse().unwrap();
        assert!((1000..=9999).contains(&digits));

        assert_eq!(ledger.claims()[0].id, 3);
        assert_eq!(ledger.coverage().vision.used, 350.0);
    }

    #[test]
    fn usage_may_exceed_total() {
        let ledger = ClaimsLedger::empty();
        ledger.submit(vision_claim(1000.0));
        let vision = ledger.coverage().vision;
        assert_eq!(vision.used, 800.0);
        ledger.submit(vision_claim(1000.0));
        let vision = ledger.coverage().vision;
        assert_eq!(vision.used, 1600.0);
        assert_eq!(vision.remaining(), 0.0);
    }

    #[test]
    fn status_machine() {
        let ledger = ClaimsLedger::empty();
        let id = ledger.submit(vision_claim(100.0)).id;

        assert_eq!(
            ledger.transition(id, ClaimStatus::Paid),
            Err(ClaimError::InvalidTransition {
                id,
                from: ClaimStatus::InReview,
                to: ClaimStatus::Paid,
            })
        );

        let approved = ledger.approve(id, 80.0).unwrap();
        assert_eq!(approved.status, ClaimStatus::Approved);
        assert_eq!(approved.covered_amount, 80.0);

        assert_eq!(ledger.transition(id, ClaimStatus::Paid).unwrap().status, ClaimStatus::Paid);
        assert!(matches!(
            ledger.transition(id, ClaimStatus::Denied),
            Err(ClaimError::InvalidTransition { .. })
        ));
        assert_eq!(ledger.transition(99, ClaimStatus::Paid), Err(ClaimError::NotFound(99)));
        assert!(matches!(
            ledger.approve(id, f64::NAN),
            Err(ClaimError::InvalidAmount(_))
        ));
    }

    #[test]
    fn denied_is_final() {
        assert!(ClaimStatus::InReview.can_become(ClaimStatus::Denied));
        for next in [
            ClaimStatus::Submitted,
            ClaimStatus::InReview,
            ClaimStatus::Approved,
            ClaimStatus::Paid,
        ] {
            assert!(!ClaimStatus::Denied.can_become(next));
        }
    }
}
