use async_trait::async_trait;
use tracing::info;
use wizard_flow::{Context, NextAction, Result, Task, TaskResult};

use super::{progress_header, selected_category, session_keys};
use crate::path::Category;

/// First screen: pick Insurance, Investing or Banking
pub struct OnboardingTask;

#[async_trait]
impl Task for OnboardingTask {
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        let Some(category) = selected_category(&context) else {
            return Ok(TaskResult::new(
                Some("Choose a category to continue.".to_string()),
                NextAction::WaitForInput,
            ));
        };

        info!(task_id = %self.id(), %category, "category selected");

        Ok(TaskResult::new_with_status(
            None,
            NextAction::Continue,
            Some(format!("Exploring {category}")),
        ))
    }

    fn render(&self, context: &Context) -> String {
        let selected = selected_category(context);
        let mut out = progress_header(1, "What are you looking for today?");
        out.push('\n');

        for category in Category::ALL {
            let mark = if selected == Some(category) { "x" } else { " " };
            out.push_str(&format!("  [{mark}] {:<10} {}\n", category.name(), category.tagline()));
        }
        out.push_str(&format!("set {} <name>, then next", session_keys::CATEGORY));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn waits_until_a_known_category_is_chosen() {
        let context = Context::new();
        let task = OnboardingTask;

        let result = task.run(context.clone()).await.unwrap();
        assert_eq!(result.next_action, NextAction::WaitForInput);

        context.set(session_keys::CATEGORY, "Pets").await;
        let result = task.run(context.clone()).await.unwrap();
        assert_eq!(result.next_action, NextAction::WaitForInput);

        context.set(session_keys::CATEGORY, "investing").await;
        let result = task.run(context.clone()).await.unwrap();
        assert_eq!(result.next_action, NextAction::Continue);
        assert_eq!(result.status_message.as_deref(), Some("Exploring Investing"));
    }

    #[test]
    fn render_marks_the_selection() {
        let context = Context::new();
        context.set_sync(session_keys::CATEGORY, "Banking");

        let screen = OnboardingTask.render(&context);
        assert!(screen.starts_with("[Step 1 of 4]"));
        assert!(screen.contains("[x] Banking"));
        assert!(screen.contains("[ ] Insurance"));
    }
}
