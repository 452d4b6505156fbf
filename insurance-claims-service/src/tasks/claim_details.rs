use async_trait::async_trait;
use tracing::info;
use wizard_flow::{Context, NextAction, Result, Task, TaskResult};

use super::session_keys;
use crate::estimator::estimate;
use crate::models::{ClaimCategory, ClaimDraft, ClaimFor, PHYSIO_TYPES};

/// Amount, provider, date of service, receipts and, for physio, the kind of treatment
pub struct ClaimDetailsTask;

#[async_trait]
impl Task for ClaimDetailsTask {
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        let draft = ClaimDraft::from_context(&context);
        let Some(amount) = draft.amount.filter(|_| draft.details_complete()) else {
            return Ok(TaskResult::new(
                Some(format!(
                    "Fill in {} to continue.",
                    draft.missing_details().join(", ")
                )),
                NextAction::WaitForInput,
            ));
        };

        if draft.category != Some(ClaimCategory::Physio) {
            context.remove(session_keys::PHYSIO_TYPE).await;
        }
        let estimate = estimate(amount);
        info!(
            task_id = %self.id(),
            amount,
            estimated_coverage = estimate.estimated_coverage,
            receipts = draft.receipts.len(),
            "claim details confirmed"
        );
        context.set(session_keys::ESTIMATE, &estimate).await;

        Ok(TaskResult::new_with_status(
            None,
            NextAction::Continue,
            Some("Reviewing estimate".to_string()),
        ))
    }

    fn render(&self, context: &Context) -> String {
        let draft = ClaimDraft::from_context(context);
        let service = draft.category.map_or("Claim", ClaimCategory::service_name);
        let claim_for = draft.claim_for.unwrap_or(ClaimFor::Myself);

        let mut out = format!("Claim Details\n{service} for {claim_for}\n");

        if draft.category == Some(ClaimCategory::Physio) {
            out.push_str(&format!("\nType of Physiotherapy ({})\n", session_keys::PHYSIO_TYPE));
            for kind in PHYSIO_TYPES {
                let mark = if draft.physio_type.as_deref() == Some(kind) { "(o)" } else { "( )" };
                out.push_str(&format!("  {mark} {kind}\n"));
            }
        }

        let amount = context
            .get_value(session_keys::AMOUNT)
            .map(|value| match value {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            })
            .unwrap_or_default();
        let blank = |text: &str| if text.is_empty() { "-".to_string() } else { text.to_string() };
        out.push_str(&format!("\nClaim Amount ({}): {}\n", session_keys::AMOUNT, blank(&amount)));
        out.push_str(&format!(
            "Provider/Clinic Name ({}): {}\n",
            session_keys::PROVIDER_NAME,
            blank(&draft.provider_name)
        ));
        out.push_str(&format!(
            "Date of Service ({}): {}\n",
            session_keys::SERVICE_DATE,
            blank(&draft.service_date)
        ));

        out.push_str("\nReceipts\n");
        if draft.receipts.is_empty() {
            out.push_str("  none attached (receipt add <name> <bytes>)\n");
        }
        for (index, receipt) in draft.receipts.iter().enumerate() {
            out.push_str(&format!("  {}. {} ({})\n", index + 1, receipt.name, receipt.size_label()));
        }

        let gate = if draft.details_complete() {
            "continue to review".to_string()
        } else {
            format!("missing {}", draft.missing_details().join(", "))
        };
        out.push_str(&format!("\nContinue: {gate}"));
        out
    }
}
