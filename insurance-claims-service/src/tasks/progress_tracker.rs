use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use wizard_flow::{Context, NextAction, Result, Task, TaskResult};

use super::{DashboardTask, money, reset_draft, session_keys};
use crate::estimator::PROCESSING_TIME;
use crate::ledger::{ClaimStatus, ClaimsLedger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepState {
    Complete,
    Active,
    Pending,
    Failed,
}

/// Timeline rows for a claim in `status`
fn timeline(status: ClaimStatus) -> [(&'static str, StepState); 4] {
    use StepState::*;

    match status {
        ClaimStatus::Submitted => [
            ("Submitted", Active),
            ("In Review", Pending),
            ("Approved", Pending),
            ("Payment Sent", Pending),
        ],
        ClaimStatus::InReview => [
            ("Submitted", Complete),
            ("In Review", Active),
            ("Approved", Pending),
            ("Payment Sent", Pending),
        ],
        ClaimStatus::Approved => [
            ("Submitted", Complete),
            ("In Review", Complete),
            ("Approved", Complete),
            ("Payment Sent", Active),
        ],
        ClaimStatus::Denied => [
            ("Submitted", Complete),
            ("In Review", Complete),
            ("Denied", Failed),
            ("Payment Sent", Pending),
        ],
        ClaimStatus::Paid => [
            ("Submitted", Complete),
            ("In Review", Complete),
            ("Approved", Complete),
            ("Payment Sent", Complete),
        ],
    }
}

/// Confirmation screen for the claim just filed.
///
/// Back is disabled here; the only way out is "Back to Dashboard", which
/// also clears the draft.
pub struct ProgressTrackerTask {
    ledger: Arc<ClaimsLedger>,
}

impl ProgressTrackerTask {
    pub fn new(ledger: Arc<ClaimsLedger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl Task for ProgressTrackerTask {
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        reset_draft(&context).await;
        info!(task_id = %self.id(), "back to dashboard");

        Ok(TaskResult::new_with_status(
            None,
            NextAction::GoTo(std::any::type_name::<DashboardTask>().to_string()),
            None,
        ))
    }

    async fn back(&self, _context: Context) -> Result<NextAction> {
        Ok(NextAction::WaitForInput)
    }

    fn render(&self, context: &Context) -> String {
        let Some(claim) = context
            .get_sync::<u32>(session_keys::SUBMITTED_CLAIM_ID)
            .and_then(|id| self.ledger.claim(id))
        else {
            return "Claim Submitted!\n\nnext: Back to Dashboard".to_string();
        };

        let mut out = String::from("Claim Submitted!\n\n");
        if let Some(reference) = &claim.reference {
            out.push_str(&format!("Claim Reference  {reference}\n"));
        }
        out.push_str(&format!(
            "{} for {}, {}\n\n",
            claim.category.service_name(),
            claim.claim_for,
            money(claim.amount)
        ));

        for (name, state) in timeline(claim.status) {
            let (mark, note) = match state {
                StepState::Complete => ("[x]", "Completed"),
                StepState::Active => ("[>]", "In progress"),
                StepState::Pending => ("[ ]", "Pending"),
                StepState::Failed => ("[!]", "Not covered"),
            };
            out.push_str(&format!("  {mark} {name:<13} {note}\n"));
        }

        let processing_time = claim
            .estimate
            .as_ref()
            .map_or(PROCESSING_TIME, |estimate| estimate.processing_time.as_str());
        out.push_str(&format!(
            "\nWe're reviewing your claim now. You'll receive a notification once it's approved. \
             Expected completion: {processing_time}.\n\nnext: Back to Dashboard"
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::estimate;
    use crate::ledger::NewClaim;
    use crate::models::{ClaimCategory, ClaimFor};
    use serde_json::json;

    fn filed(ledger: &ClaimsLedger) -> u32 {
        ledger
            .submit(NewClaim {
                category: ClaimCategory::Dental,
                claim_for: ClaimFor::Child,
                amount: 200.0,
                estimate: estimate(200.0),
                provider_name: "Smile Co".to_string(),
                service_date: "2025-11-30".to_string(),
                physio_type: None,
                receipts: vec![],
            })
            .id
    }

    #[tokio::test]
    async fn back_to_dashboard_resets_draft() {
        let task = ProgressTrackerTask::new(Arc::new(ClaimsLedger::empty()));
        let context = Context::new();
        context.set(session_keys::CATEGORY, "vision").await;
        context.set(session_keys::CLAIM_FOR, "Spouse").await;
        context.set(session_keys::AMOUNT, 90).await;

        let result = task.run(context.clone()).await.unwrap();
        assert_eq!(
            result.next_action,
            NextAction::GoTo(std::any::type_name::<DashboardTask>().to_string())
        );
        assert_eq!(context.get_value(session_keys::CATEGORY), Some(json!("")));
        assert_eq!(context.get_value(session_keys::CLAIM_FOR), Some(json!("Self")));
        assert!(!context.contains(session_keys::AMOUNT));
    }

    #[tokio::test]
    async fn refuses_back() {
        let task = ProgressTrackerTask::new(Arc::new(ClaimsLedger::empty()));
        assert_eq!(task.back(Context::new()).await.unwrap(), NextAction::WaitForInput);
    }

    #[test]
    fn timeline_follows_ledger_status() {
        let ledger = Arc::new(ClaimsLedger::empty());
        let id = filed(&ledger);
        let task = ProgressTrackerTask::new(ledger.clone());
        let context = Context::new();
        context.set_sync(session_keys::SUBMITTED_CLAIM_ID, id);

        let screen = task.render(&context);
        assert!(screen.contains("Dental Care for Child, $200.00"));
        assert!(screen.contains("[x] Submitted"));
        assert!(screen.contains("[>] In Review"));
        assert!(screen.contains("Expected completion: 24 Hours."));

        ledger.approve(id, 160.0).unwrap();
        let screen = task.render(&context);
        assert!(screen.contains("[x] Approved"));
        assert!(screen.contains("[>] Payment Sent"));
    }
}
