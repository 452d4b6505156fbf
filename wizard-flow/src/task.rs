use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{context::Context, error::Result};

/// Result of a task execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    /// Response to show the user
    pub response: Option<String>,
    /// Next action to take
    pub next_action: NextAction,
    /// Id of the task that produced this result, filled in by the graph
    #[serde(default)]
    pub task_id: String,
    /// Short description of where the session stands
    pub status_message: Option<String>,
}

impl TaskResult {
    pub fn new(response: Option<String>, next_action: NextAction) -> Self {
        Self {
            response,
            next_action,
            task_id: String::new(),
            status_message: None,
        }
    }

    pub fn new_with_status(
        response: Option<String>,
        next_action: NextAction,
        status_message: Option<String>,
    ) -> Self {
        Self {
            response,
            next_action,
            task_id: String::new(),
            status_message,
        }
    }
}

/// Defines what should happen after a task completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextAction {
    /// Move to the next task along the graph edges and wait there
    Continue,
    /// Move to the next task and run it straight away
    ContinueAndExecute,
    /// Go to a specific task by ID
    GoTo(String),
    /// Go back to the previous task
    GoBack,
    /// End the graph execution
    End,
    /// Stay on the current task until the user changes something
    WaitForInput,
}

/// A single wizard screen.
///
/// `run` is the "Continue" button: it checks the screen's gate and decides
/// where the session goes next. `back` is the "Back" button. `render`
/// draws the screen from the current form state and must not mutate it.
#[async_trait]
pub trait Task: Send + Sync {
    /// Unique identifier for this task
    fn id(&self) -> &str;

    /// Execute the task with the given context
    async fn run(&self, context: Context) -> Result<TaskResult>;

    /// Handle a back request. The default walks one screen back in history.
    async fn back(&self, _context: Context) -> Result<NextAction> {
        Ok(NextAction::GoBack)
    }

    /// Text view of the screen for the current form state
    fn render(&self, _context: &Context) -> String {
        String::new()
    }
}
