use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};
use wizard_flow::{Context, NextAction, Result, Task, TaskResult};

use super::{prepared_path, progress_header, session_keys};
use crate::estimates::{education_projection, mortgage_breakdown, years_to_retirement};
use crate::path::AssessmentPath;
use crate::questions::{Input, Question, questions};
use crate::validation::{is_valid, required_fields};

/// Third screen: the path specific questionnaire.
///
/// The screen owns its sub-steps. Continue walks through them and only
/// leaves the screen after the last one; Back walks them in reverse before
/// handing control back to the router. A subcategory changed mid-way sends
/// the user back to confirm it, so the new path starts at its first question.
pub struct NeedsAssessmentTask;

fn current_step(context: &Context, path: AssessmentPath) -> u8 {
    context
        .get_sync::<u8>(session_keys::ASSESSMENT_STEP)
        .unwrap_or(1)
        .clamp(1, path.total_sub_steps())
}

#[async_trait]
impl Task for NeedsAssessmentTask {
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        let Some(path) = prepared_path(&context) else {
            warn!(task_id = %self.id(), "assessment path missing or changed");
            return Ok(TaskResult::new(
                Some("Confirm your subcategory to start its questions.".to_string()),
                NextAction::GoBack,
            ));
        };

        let step = current_step(&context, path);
        let total = path.total_sub_steps();

        if !is_valid(path, step, &context) {
            let missing = required_fields(path, step)
                .iter()
                .filter(|field| !is_valid_alone(path, step, &context, field))
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            return Ok(TaskResult::new(
                Some(format!("Answer {missing} to continue.")),
                NextAction::WaitForInput,
            ));
        }

        if step < total {
            context.set(session_keys::ASSESSMENT_STEP, step + 1).await;
            info!(task_id = %self.id(), %path, step = step + 1, total, "assessment step advanced");
            return Ok(TaskResult::new_with_status(
                None,
                NextAction::WaitForInput,
                Some(format!("Question {} of {total}", step + 1)),
            ));
        }

        info!(task_id = %self.id(), %path, "assessment complete");
        Ok(TaskResult::new_with_status(
            None,
            NextAction::ContinueAndExecute,
            Some("Assessment complete".to_string()),
        ))
    }

    async fn back(&self, context: Context) -> Result<NextAction> {
        let Some(path) = prepared_path(&context) else {
            return Ok(NextAction::GoBack);
        };

        let step = current_step(&context, path);
        if step > 1 {
            context.set(session_keys::ASSESSMENT_STEP, step - 1).await;
            info!(task_id = %self.id(), %path, step = step - 1, "assessment step back");
            Ok(NextAction::WaitForInput)
        } else {
            Ok(NextAction::GoBack)
        }
    }

    fn render(&self, context: &Context) -> String {
        let Some(path) = prepared_path(context) else {
            return progress_header(3, "Subcategory not confirmed, continue to go back and pick one");
        };
        let step = current_step(context, path);
        let total = path.total_sub_steps();

        let mut out = progress_header(3, &format!("Tell us about your needs ({path})"));
        out.push_str(&format!("\nQuestion {step} of {total}\n"));

        for question in questions(path, step) {
            render_question(&mut out, question, context);
        }
        render_estimates(&mut out, path, step, context);

        let gate = if is_valid(path, step, context) {
            if step < total { "next question" } else { "see recommendation" }
        } else {
            "answer the question(s) above first"
        };
        out.push_str(&format!("Continue: {gate}"));
        out
    }
}

/// Whether `field` on its own satisfies the gate, used to name what is missing
fn is_valid_alone(path: AssessmentPath, step: u8, context: &Context, field: &str) -> bool {
    let probe = Context::new();
    for other in required_fields(path, step) {
        if *other == field {
            if let Some(value) = context.get_value(field) {
                probe.set_sync(field, value);
            }
        } else {
            probe.set_sync(*other, "filled");
        }
    }
    is_valid(path, step, &probe)
}

fn render_question(out: &mut String, question: &Question, context: &Context) {
    let value = context.get_value(question.field);
    out.push_str(&format!("\n{} ({})\n", question.prompt, question.field));

    match question.input {
        Input::Choice(choices) | Input::MultiChoice(choices) => {
            let multi = matches!(question.input, Input::MultiChoice(_));
            for choice in choices {
                let picked = value.as_ref().is_some_and(|value| choice.matches(value));
                let mark = match (multi, picked) {
                    (true, true) => "[x]",
                    (true, false) => "[ ]",
                    (false, true) => "(o)",
                    (false, false) => "( )",
                };
                out.push_str(&format!("  {mark} {:<14} {}\n", choice.id, choice.label));
            }
            if multi {
                out.push_str(&format!("  toggle {} <id>\n", question.field));
            }
        }
        Input::Number { min, max, step } => {
            let range = match max {
                Some(max) => format!("{min}..={max}, step {step}"),
                None => format!("at least {min}"),
            };
            out.push_str(&format!("  value: {} ({range})\n", display(value.as_ref())));
        }
        Input::Date => {
            out.push_str(&format!("  date: {} (YYYY-MM-DD)\n", display(value.as_ref())));
        }
    }
}

fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn render_estimates(out: &mut String, path: AssessmentPath, step: u8, context: &Context) {
    match (path, step) {
        (AssessmentPath::InvestingRetirement, 1) => {
            if let Some(years) = years_to_retirement(context) {
                out.push_str(&format!("\nYou have {years} years to save for retirement\n"));
            }
        }
        (AssessmentPath::InvestingEducation, 2) => {
            if let Some(projection) = education_projection(context) {
                out.push_str(&format!(
                    "\nAnnual contribution: ${}\nGovernment grant: ${:.0}/year\n",
                    projection.annual_contribution, projection.government_grant
                ));
            }
        }
        (AssessmentPath::BankingMortgage, 2) => {
            if let Some(breakdown) = mortgage_breakdown(context) {
                out.push_str(&format!(
                    "\nDown payment: {:.1}%\nMortgage needed: ${}\n",
                    breakdown.down_payment_percent, breakdown.mortgage_needed
                ));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::fields;
    use serde_json::json;

    fn choose_path(context: &Context, category: &str, sub_category: &str) {
        context.set_sync(session_keys::CATEGORY, category);
        context.set_sync(session_keys::SUB_CATEGORY, sub_category);
        let path = AssessmentPath::parse(category, sub_category).unwrap();
        context.set_sync(session_keys::ASSESSMENT_PATH, path.to_string());
    }

    async fn context_for(category: &str, sub_category: &str) -> Context {
        let context = Context::new();
        choose_path(&context, category, sub_category);
        context.set(session_keys::ASSESSMENT_STEP, 1).await;
        context
    }

    #[tokio::test]
    async fn closed_gate_keeps_the_step() {
        let context = context_for("Insurance", "life").await;
        let result = NeedsAssessmentTask.run(context.clone()).await.unwrap();

        assert_eq!(result.next_action, NextAction::WaitForInput);
        assert_eq!(result.response.as_deref(), Some("Answer purpose to continue."));
        assert_eq!(context.get_value(session_keys::ASSESSMENT_STEP), Some(json!(1)));
    }

    #[tokio::test]
    async fn names_only_the_missing_fields() {
        let context = context_for("Banking", "mortgage").await;
        context.set(session_keys::ASSESSMENT_STEP, 2).await;
        context.set(fields::PURCHASE_PRICE, "500000").await;

        let result = NeedsAssessmentTask.run(context).await.unwrap();
        assert_eq!(result.response.as_deref(), Some("Answer downPayment to continue."));
    }

    #[tokio::test]
    async fn walks_sub_steps_then_leaves() {
        let context = context_for("Banking", "credit-card").await;
        for (step, (field, value)) in [
            (fields::REWARDS_PRIORITY, "cashback"),
            (fields::ANNUAL_FEE_PREFERENCE, "no"),
        ]
        .into_iter()
        .enumerate()
        {
            context.set(field, value).await;
            let result = NeedsAssessmentTask.run(context.clone()).await.unwrap();
            assert_eq!(result.next_action, NextAction::WaitForInput);
            assert_eq!(
                context.get_value(session_keys::ASSESSMENT_STEP),
                Some(json!(step + 2))
            );
        }

        context.set(fields::REWARD_PREFERENCE, "cashBack").await;
        let result = NeedsAssessmentTask.run(context).await.unwrap();
        assert_eq!(result.next_action, NextAction::ContinueAndExecute);
    }

    #[tokio::test]
    async fn back_walks_sub_steps_before_leaving() {
        let context = context_for("Investing", "mutual-funds").await;
        context.set(session_keys::ASSESSMENT_STEP, 3).await;

        assert_eq!(NeedsAssessmentTask.back(context.clone()).await.unwrap(), NextAction::WaitForInput);
        assert_eq!(NeedsAssessmentTask.back(context.clone()).await.unwrap(), NextAction::WaitForInput);
        assert_eq!(context.get_value(session_keys::ASSESSMENT_STEP), Some(json!(1)));
        assert_eq!(NeedsAssessmentTask.back(context).await.unwrap(), NextAction::GoBack);
    }

    #[tokio::test]
    async fn changed_subcategory_sends_the_user_back() {
        let context = context_for("Insurance", "life").await;
        context.set(session_keys::ASSESSMENT_STEP, 2).await;
        context.set(session_keys::SUB_CATEGORY, "critical").await;
        context.set(fields::CONDITION_FOCUS, json!(["cancer"])).await;

        let result = NeedsAssessmentTask.run(context.clone()).await.unwrap();
        assert_eq!(result.next_action, NextAction::GoBack);
        assert!(!context.contains(session_keys::RECOMMENDATION));
        assert_eq!(NeedsAssessmentTask.back(context.clone()).await.unwrap(), NextAction::GoBack);
        assert!(NeedsAssessmentTask.render(&context).contains("Subcategory not confirmed"));
    }

    #[test]
    fn huge_monthly_contribution_skips_the_projection() {
        let context = Context::new();
        choose_path(&context, "Investing", "education");
        context.set_sync(session_keys::ASSESSMENT_STEP, 2);
        context.set_sync(fields::MONTHLY_CONTRIBUTION, i64::MAX);

        let screen = NeedsAssessmentTask.render(&context);
        assert!(screen.contains("Question 2 of 2"));
        assert!(!screen.contains("Annual contribution"));
    }

    #[test]
    fn render_shows_selections_and_estimates() {
        let context = Context::new();
        choose_path(&context, "Investing", "retirement");
        context.set_sync(fields::CURRENT_AGE, "35");
        context.set_sync(fields::RETIREMENT_AGE, 65);

        let screen = NeedsAssessmentTask.render(&context);
        assert!(screen.contains("Question 1 of 2"));
        assert!(screen.contains("You have 30 years to save for retirement"));
        assert!(screen.contains("Continue: next question"));

        choose_path(&context, "Insurance", "health");
        context.set_sync(session_keys::ASSESSMENT_STEP, 2);
        context.set_sync(fields::BENEFITS, json!(["dental"]));
        let screen = NeedsAssessmentTask.render(&context);
        assert!(screen.contains("[x] dental"));
        assert!(screen.contains("[ ] vision"));
        assert!(screen.contains("Continue: see recommendation"));
    }
}
