use async_trait::async_trait;
use tracing::info;
use wizard_flow::{Context, NextAction, Result, Task, TaskResult};

use super::session_keys;
use crate::models::{ClaimCategory, ClaimDraft, ClaimFor};

/// Pick the kind of expense and who it was for
pub struct SelectionQuizTask;

#[async_trait]
impl Task for SelectionQuizTask {
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        let draft = ClaimDraft::from_context(&context);
        let (Some(category), Some(claim_for)) = (draft.category, draft.claim_for) else {
            return Ok(TaskResult::new(
                Some("Select a claim type to continue.".to_string()),
                NextAction::WaitForInput,
            ));
        };

        info!(task_id = %self.id(), category = category.id(), %claim_for, "claim type selected");
        Ok(TaskResult::new_with_status(
            None,
            NextAction::Continue,
            Some(format!("{} for {claim_for}", category.service_name())),
        ))
    }

    fn render(&self, context: &Context) -> String {
        let draft = ClaimDraft::from_context(context);

        let mut out = String::from("Start a Claim\n\nWhat type of claim?\n");
        for category in ClaimCategory::ALL {
            let mark = if draft.category == Some(category) { "(o)" } else { "( )" };
            out.push_str(&format!("  {mark} {:<7} {}\n", category.id(), category.tile_name()));
        }

        out.push_str("\nWho is this for?\n ");
        for claim_for in ClaimFor::ALL {
            let mark = if draft.claim_for == Some(claim_for) { "(o)" } else { "( )" };
            out.push_str(&format!(" {mark} {claim_for}"));
        }

        let gate = if draft.selection_complete() {
            "continue"
        } else {
            "select a claim type first"
        };
        out.push_str(&format!(
            "\n\nset {} <type>, set {} <who>\nContinue: {gate}",
            session_keys::CATEGORY,
            session_keys::CLAIM_FOR
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::seed_draft;

    #[tokio::test]
    async fn needs_a_category() {
        let context = Context::new();
        seed_draft(&context);

        let result = SelectionQuizTask.run(context.clone()).await.unwrap();
        assert_eq!(result.next_action, NextAction::WaitForInput);

        context.set(session_keys::CATEGORY, "vision").await;
        let result = SelectionQuizTask.run(context.clone()).await.unwrap();
        assert_eq!(result.next_action, NextAction::Continue);
        assert_eq!(result.status_message.as_deref(), Some("Vision Care for Self"));
    }

    #[tokio::test]
    async fn unknown_claimant_keeps_gate_closed() {
        let context = Context::new();
        context.set(session_keys::CATEGORY, "dental").await;
        context.set(session_keys::CLAIM_FOR, "Neighbour").await;

        let result = SelectionQuizTask.run(context).await.unwrap();
        assert_eq!(result.next_action, NextAction::WaitForInput);
    }

    #[test]
    fn render_marks_selection() {
        let context = Context::new();
        seed_draft(&context);
        context.set_sync(session_keys::CATEGORY, "drug");

        let screen = SelectionQuizTask.render(&context);
        assert!(screen.contains("(o) drug    Prescription"));
        assert!(screen.contains("(o) Self ( ) Spouse ( ) Child"));
        assert!(screen.ends_with("Continue: continue"));
    }
}
