use async_trait::async_trait;
use tracing::{debug, info};
use wizard_flow::{Context, NextAction, Result, Task, TaskResult};

use super::{fields, progress_header, selected_category, selected_path, session_keys};
use crate::path::AssessmentPath;

/// Second screen: narrow the category down to one product line
pub struct SubCategoryTask;

impl SubCategoryTask {
    /// Prepare the assessment for `path`.
    ///
    /// Re-entering the same path keeps its answers. Switching to another path
    /// drops every answer and seeds the new path's slider defaults.
    async fn begin_assessment(&self, context: &Context, path: AssessmentPath) {
        let previous: Option<String> = context.get(session_keys::ASSESSMENT_PATH).await;
        if previous.as_deref() != Some(path.to_string().as_str()) {
            for field in fields::ALL {
                context.remove(field).await;
            }
            for (field, value) in path.defaults() {
                context.set(field, value).await;
            }
            context.set(session_keys::ASSESSMENT_PATH, path.to_string()).await;
            debug!(%path, previous = ?previous, "assessment answers reset");
        }
        context.set(session_keys::ASSESSMENT_STEP, 1u8).await;
    }
}

#[async_trait]
impl Task for SubCategoryTask {
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        let Some(path) = selected_path(&context) else {
            return Ok(TaskResult::new(
                Some("Choose one of the listed options to continue.".to_string()),
                NextAction::WaitForInput,
            ));
        };

        self.begin_assessment(&context, path).await;
        info!(task_id = %self.id(), %path, "subcategory selected");

        Ok(TaskResult::new_with_status(
            None,
            NextAction::Continue,
            Some(format!("Assessing {path}")),
        ))
    }

    fn render(&self, context: &Context) -> String {
        let Some(category) = selected_category(context) else {
            return progress_header(2, "No category selected, go back and pick one");
        };
        let selected: Option<String> = context.get_sync(session_keys::SUB_CATEGORY);

        let mut out = progress_header(2, &format!("{category}: what would you like to explore?"));
        out.push('\n');
        for option in category.sub_categories() {
            let mark = if selected.as_deref() == Some(option.id) { "x" } else { " " };
            out.push_str(&format!(
                "  [{mark}] {:<13} {} ({})\n",
                option.id, option.title, option.description
            ));
        }
        out.push_str(&format!("set {} <id>, then next", session_keys::SUB_CATEGORY));
        out
    }
}
