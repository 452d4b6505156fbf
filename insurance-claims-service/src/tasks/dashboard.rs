use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use wizard_flow::{Context, NextAction, Result, Task, TaskResult};

use super::money;
use crate::ledger::ClaimsLedger;
use crate::models::CoverageBucket;

/// Home screen: benefit usage, recent claims and "Start New Claim"
pub struct DashboardTask {
    ledger: Arc<ClaimsLedger>,
}

impl DashboardTask {
    pub fn new(ledger: Arc<ClaimsLedger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl Task for DashboardTask {
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, _context: Context) -> Result<TaskResult> {
        info!(task_id = %self.id(), "new claim started");
        Ok(TaskResult::new_with_status(
            None,
            NextAction::Continue,
            Some("Starting a new claim".to_string()),
        ))
    }

    fn render(&self, _context: &Context) -> String {
        let coverage = self.ledger.coverage();
        let claims = self.ledger.claims();

        let mut out = String::from("My Claims\n\nCoverage Overview\n");
        for bucket in CoverageBucket::ALL {
            let usage = coverage.bucket(bucket);
            out.push_str(&format!(
                "  {:<12} ${:.0} of ${:.0} used ({:.0}%), ${:.0} left\n",
                bucket.name(),
                usage.used,
                usage.total,
                usage.percent_used(),
                usage.remaining()
            ));
        }

        out.push_str("\nRecent Claims\n");
        if claims.is_empty() {
            out.push_str("  No claims yet\n");
        }
        for claim in &claims {
            out.push_str(&format!(
                "  #{:<3} {:<14} {:<13} {:>9}  {}\n",
                claim.id,
                claim.category.record_name(),
                claim.date,
                claim.amount_label(),
                claim.status
            ));
            if claim.covered_amount > 0.0 {
                out.push_str(&format!("       covered {}\n", money(claim.covered_amount)));
            }
        }

        out.push_str("\nnext: Start New Claim");
        out
    }
}
