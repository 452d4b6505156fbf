use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use wizard_flow::{Context, NextAction, Result, Task, TaskResult};

use super::{money, session_keys};
use crate::estimator::estimate;
use crate::ledger::{ClaimsLedger, NewClaim};
use crate::models::ClaimDraft;

/// Summary of the draft with the coverage prediction; Continue files the claim
pub struct EstimateReviewTask {
    ledger: Arc<ClaimsLedger>,
}

impl EstimateReviewTask {
    pub fn new(ledger: Arc<ClaimsLedger>) -> Self {
        Self { ledger }
    }
}

fn new_claim(draft: ClaimDraft) -> Option<NewClaim> {
    if !draft.details_complete() {
        return None;
    }
    let amount = draft.amount?;
    Some(NewClaim {
        category: draft.category?,
        claim_for: draft.claim_for?,
        amount,
        estimate: estimate(amount),
        provider_name: draft.provider_name,
        service_date: draft.service_date,
        physio_type: draft.physio_type,
        receipts: draft.receipts,
    })
}

#[async_trait]
impl Task for EstimateReviewTask {
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        let Some(claim) = new_claim(ClaimDraft::from_context(&context)) else {
            warn!(task_id = %self.id(), "review reached with an incomplete draft");
            return Ok(TaskResult::new(
                Some("Some claim details are missing, go back to complete them.".to_string()),
                NextAction::WaitForInput,
            ));
        };

        let record = self.ledger.submit(claim);
        context.set(session_keys::SUBMITTED_CLAIM_ID, record.id).await;

        let reference = record.reference.unwrap_or_default();
        info!(task_id = %self.id(), claim_id = record.id, %reference, "claim filed");

        Ok(TaskResult::new_with_status(
            Some(format!("Claim {reference} submitted.")),
            NextAction::Continue,
            Some(format!("Tracking claim {reference}")),
        ))
    }

    fn render(&self, context: &Context) -> String {
        let Some(claim) = new_claim(ClaimDraft::from_context(context)) else {
            return "Review Your Claim\n\nSome claim details are missing, go back to complete them."
                .to_string();
        };

        let mut out = String::from("Review Your Claim\n\n");
        out.push_str(&format!("  Claim Type      {}\n", claim.category.service_name()));
        out.push_str(&format!("  Claim For       {}\n", claim.claim_for));
        if let Some(kind) = &claim.physio_type {
            out.push_str(&format!("  Treatment       {kind}\n"));
        }
        out.push_str(&format!("  Provider        {}\n", claim.provider_name));
        out.push_str(&format!("  Date of Service {}\n", claim.service_date));
        out.push_str(&format!("  Claim Amount    {}\n", money(claim.amount)));
        out.push_str(&format!("  Receipts        {}\n", claim.receipts.len()));

        let percent = claim.estimate.coverage_percent(claim.amount);
        let filled = (percent / 10.0).round().clamp(0.0, 10.0) as usize;
        out.push_str(&format!(
            "\nEstimated Coverage    {} [{}{}] {percent:.0}%\n",
            money(claim.estimate.estimated_coverage),
            "#".repeat(filled),
            ".".repeat(10 - filled)
        ));
        out.push_str(&format!("Estimated Processing  {}\n", claim.estimate.processing_time));
        out.push_str(
            "\nThese estimates are based on your current coverage and claim history. \
             Final amounts may vary after review.\n\nnext: Submit Claim",
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::seed_draft;

    fn complete_draft() -> Context {
        let context = Context::new();
        seed_draft(&context);
        context.set_sync(session_keys::CATEGORY, "physio");
        context.set_sync(session_keys::PHYSIO_TYPE, "Post-Surgery");
        context.set_sync(session_keys::AMOUNT, 120);
        context.set_sync(session_keys::PROVIDER_NAME, "Align Physio");
        context.set_sync(session_keys::SERVICE_DATE, "2025-11-25");
        context
    }

    #[tokio::test]
    async fn submit_files_claim_and_charges_paramedical() {
        let ledger = Arc::new(ClaimsLedger::with_demo_data());
        let task = EstimateReviewTask::new(ledger.clone());
        let context = complete_draft();

        let result = task.run(context.clone()).await.unwrap();
        assert_eq!(result.next_action, NextAction::Continue);

        let id: u32 = context.get(session_keys::SUBMITTED_CLAIM_ID).await.unwrap();
        let record = ledger.claim(id).unwrap();
        assert_eq!(record.id, 3);
        assert_eq!(record.category.record_name(), "Physiotherapy");
        assert_eq!(record.status.label(), "Processing");
        assert_eq!(record.physio_type.as_deref(), Some("Post-Surgery"));
        assert_eq!(ledger.coverage().paramedical.used, 320.0 + 96.0);
    }

    #[tokio::test]
    async fn incomplete_draft_is_not_filed() {
        let ledger = Arc::new(ClaimsLedger::empty());
        let task = EstimateReviewTask::new(ledger.clone());
        let context = complete_draft();
        context.set_sync(session_keys::AMOUNT, "");

        let result = task.run(context).await.unwrap();
        assert_eq!(result.next_action, NextAction::WaitForInput);
        assert!(ledger.claims().is_empty());
    }

    #[test]
    fn render_shows_prediction() {
        let task = EstimateReviewTask::new(Arc::new(ClaimsLedger::empty()));
        let screen = task.render(&complete_draft());

        assert!(screen.contains("Physiotherapy"));
        assert!(screen.contains("Treatment       Post-Surgery"));
        assert!(screen.contains("Estimated Coverage    $96.00 [########..] 80%"));
        assert!(screen.contains("Estimated Processing  24 Hours"));
    }
}
