use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::{
    context::Context,
    error::{GraphError, Result},
    storage::Session,
    task::{NextAction, Task, TaskResult},
};

/// Seeds a fresh or restarted session with its initial field values
pub type ContextInitializer = Arc<dyn Fn(&Context) + Send + Sync>;

/// Edge between tasks in the graph
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// A graph of wizard screens
pub struct Graph {
    pub id: String,
    tasks: DashMap<String, Arc<dyn Task>>,
    edges: Vec<Edge>,
    start_task_id: Option<String>,
    initializer: Option<ContextInitializer>,
}

impl Graph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tasks: DashMap::new(),
            edges: Vec::new(),
            start_task_id: None,
            initializer: None,
        }
    }

    /// Add a task to the graph
    pub fn add_task(&mut self, task: Arc<dyn Task>) -> &mut Self {
        let task_id = task.id().to_string();
        let is_first = self.tasks.is_empty();
        self.tasks.insert(task_id.clone(), task);

        // First task added is the entry screen
        if is_first {
            self.start_task_id = Some(task_id);
        }

        self
    }

    /// Add an edge between tasks
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push(Edge {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Register the values every new or restarted session starts with
    pub fn set_initial_context<F>(&mut self, initializer: F) -> &mut Self
    where
        F: Fn(&Context) + Send + Sync + 'static,
    {
        self.initializer = Some(Arc::new(initializer));
        self
    }

    /// Create a session parked on the start task with initial values applied
    pub fn start_session(&self, session_id: impl Into<String>) -> Result<Session> {
        let start = self
            .start_task_id
            .clone()
            .ok_or_else(|| GraphError::TaskNotFound("<start>".to_string()))?;

        let mut session = Session::new_from_task(session_id.into(), &start);
        session.graph_id = self.id.clone();
        self.seed(&session.context);

        info!(session_id = %session.id, graph_id = %self.id, task_id = %start, "session started");
        Ok(session)
    }

    /// Run the current task once and move the session according to its answer.
    ///
    /// A task that answers `WaitForInput` leaves the session exactly where it
    /// was, which is how closed validation gates turn "Continue" into a no-op.
    pub async fn execute_session(&self, session: &mut Session) -> Result<ExecutionResult> {
        let result = self
            .execute_single_task(&session.current_task_id, session.context.clone())
            .await?;

        // A closed gate answers WaitForInput with no status and must not touch the session
        if result.next_action != NextAction::WaitForInput || result.status_message.is_some() {
            session.status_message = result.status_message.clone();
        }

        match &result.next_action {
            NextAction::Continue => {
                if let Some(next_task_id) = self.next_task(&result.task_id) {
                    self.move_forward(session, next_task_id);
                }
                Ok(ExecutionResult::waiting(result.response))
            }
            NextAction::ContinueAndExecute => {
                match self.next_task(&result.task_id) {
                    Some(next_task_id) => {
                        self.move_forward(session, next_task_id);
                        Box::pin(self.execute_session(session)).await
                    }
                    None => Ok(ExecutionResult::waiting(result.response)),
                }
            }
            NextAction::WaitForInput => Ok(ExecutionResult::waiting(result.response)),
            NextAction::End => Ok(ExecutionResult {
                response: result.response,
                status: ExecutionStatus::Completed,
            }),
            NextAction::GoTo(target_id) => {
                if !self.tasks.contains_key(target_id) {
                    return Err(GraphError::TaskNotFound(target_id.clone()));
                }
                self.move_forward(session, target_id.clone());
                Ok(ExecutionResult::waiting(result.response))
            }
            NextAction::GoBack => {
                self.step_back(session).await?;
                Ok(ExecutionResult::waiting(result.response))
            }
        }
    }

    /// Ask the current task how to handle "Back" and apply its answer
    pub async fn retreat_session(&self, session: &mut Session) -> Result<ExecutionResult> {
        let task = self
            .get_task(&session.current_task_id)
            .ok_or_else(|| GraphError::TaskNotFound(session.current_task_id.clone()))?;

        match task.back(session.context.clone()).await? {
            NextAction::GoBack => self.step_back(session).await?,
            NextAction::GoTo(target_id) => {
                if !self.tasks.contains_key(&target_id) {
                    return Err(GraphError::TaskNotFound(target_id));
                }
                info!(session_id = %session.id, from = %session.current_task_id, to = %target_id, "jumped back");
                session.current_task_id = target_id;
            }
            _ => {}
        }

        Ok(ExecutionResult::waiting(None))
    }

    /// Wipe the session back to the entry screen and initial values
    pub async fn restart_session(&self, session: &mut Session) -> Result<()> {
        let start = self
            .start_task_id
            .clone()
            .ok_or_else(|| GraphError::TaskNotFound("<start>".to_string()))?;

        session.context.clear().await;
        self.seed(&session.context);
        session.history.clear();
        session.status_message = None;
        session.current_task_id = start;

        info!(session_id = %session.id, task_id = %session.current_task_id, "session restarted");
        Ok(())
    }

    /// Render the session's current screen
    pub fn render(&self, session: &Session) -> Result<String> {
        let task = self
            .get_task(&session.current_task_id)
            .ok_or_else(|| GraphError::TaskNotFound(session.current_task_id.clone()))?;
        Ok(task.render(&session.context))
    }

    /// Execute a single task without following Continue actions
    async fn execute_single_task(&self, task_id: &str, context: Context) -> Result<TaskResult> {
        let task = self
            .get_task(task_id)
            .ok_or_else(|| GraphError::TaskNotFound(task_id.to_string()))?;

        let mut result = task.run(context).await?;

        // Set the task_id in the result to track which task generated it
        result.task_id = task_id.to_string();

        Ok(result)
    }

    fn move_forward(&self, session: &mut Session, next_task_id: String) {
        info!(
            session_id = %session.id,
            from = %session.current_task_id,
            to = %next_task_id,
            "advanced"
        );
        // Looping back to a screen already behind us unwinds history to it
        if let Some(position) = session.history.iter().position(|id| *id == next_task_id) {
            session.history.truncate(position);
            session.current_task_id = next_task_id;
            return;
        }
        let previous = std::mem::replace(&mut session.current_task_id, next_task_id);
        session.history.push(previous);
    }

    async fn step_back(&self, session: &mut Session) -> Result<()> {
        match session.history.pop() {
            Some(previous) => {
                info!(session_id = %session.id, from = %session.current_task_id, to = %previous, "went back");
                session.current_task_id = previous;
                Ok(())
            }
            // Back from the entry screen means starting over
            None => self.restart_session(session).await,
        }
    }

    fn seed(&self, context: &Context) {
        if let Some(initializer) = &self.initializer {
            initializer(context);
        }
    }

    /// Screen the edge out of `current_task_id` leads to
    fn next_task(&self, current_task_id: &str) -> Option<String> {
        self.edges
            .iter()
            .find(|edge| edge.from == current_task_id)
            .map(|edge| edge.to.clone())
    }

    /// Get a task by ID
    pub fn get_task(&self, task_id: &str) -> Option<Arc<dyn Task>> {
        self.tasks.get(task_id).map(|entry| entry.clone())
    }
}

/// Builder for creating graphs
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            graph: Graph::new(id),
        }
    }

    pub fn add_task(mut self, task: Arc<dyn Task>) -> Self {
        self.graph.add_task(task);
        self
    }

    pub fn add_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.graph.add_edge(from, to);
        self
    }

    pub fn set_initial_context<F>(mut self, initializer: F) -> Self
    where
        F: Fn(&Context) + Send + Sync + 'static,
    {
        self.graph.set_initial_context(initializer);
        self
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}

/// Status of graph execution
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub response: Option<String>,
    pub status: ExecutionStatus,
}

impl ExecutionResult {
    fn waiting(response: Option<String>) -> Self {
        Self {
            response,
            status: ExecutionStatus::WaitingForInput,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExecutionStatus {
    /// Waiting for user input to continue
    WaitingForInput,
    /// Terminal screen reached
    Completed,
}
