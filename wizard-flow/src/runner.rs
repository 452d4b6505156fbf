//! `FlowRunner` loads a session, applies exactly **one** navigation step and
//! persists the updated session back to storage.
//!
//! ## When should you use `FlowRunner`?
//! * **Interactive front ends**: every button press (Continue, Back, Start Over) maps to one
//!   call, and the session is saved for the next press without any extra code.
//! * **Tests & demos**: keeps scenario code tiny; no need to repeat the load-execute-save
//!   boilerplate.
//!
//! ## When should you use `Graph::execute_session` directly?
//! * When you already hold the `Session` and want to drive several steps before saving.
//! * When you need to inspect the intermediate `Session` between steps.
//!
//! Both APIs are compatible: `FlowRunner` merely builds on top of the low-level functions.
//!
//! ```rust,ignore
//! let runner = FlowRunner::new(graph.clone(), storage.clone());
//! let session_id = runner.start("session-1").await?;
//! runner.context(&session_id).await?.set("category", "Insurance").await;
//! let result = runner.run(&session_id).await?;
//! ```

use std::sync::Arc;

use crate::{
    context::Context,
    error::{GraphError, Result},
    graph::{ExecutionResult, Graph},
    storage::{Session, SessionStorage},
};

/// High-level helper that orchestrates the common _load → step → save_ pattern.
#[derive(Clone)]
pub struct FlowRunner {
    graph: Arc<Graph>,
    storage: Arc<dyn SessionStorage>,
}

impl FlowRunner {
    /// Create a new `FlowRunner` from an `Arc<Graph>` and any `SessionStorage` implementation.
    pub fn new(graph: Arc<Graph>, storage: Arc<dyn SessionStorage>) -> Self {
        Self { graph, storage }
    }

    /// Create and persist a new session on the graph's entry screen.
    pub async fn start(&self, session_id: impl Into<String>) -> Result<String> {
        let session = self.graph.start_session(session_id)?;
        let id = session.id.clone();
        self.storage.save(session).await?;
        Ok(id)
    }

    /// Press "Continue": execute **exactly one** task for the session and persist it.
    ///
    /// Returns the same [`ExecutionResult`] that `Graph::execute_session` does, so callers can
    /// still inspect the response and the status (`WaitingForInput`, `Completed`).
    pub async fn run(&self, session_id: &str) -> Result<ExecutionResult> {
        let mut session = self.load(session_id).await?;
        let result = self.graph.execute_session(&mut session).await?;
        self.storage.save(session).await?;
        Ok(result)
    }

    /// Press "Back".
    pub async fn back(&self, session_id: &str) -> Result<ExecutionResult> {
        let mut session = self.load(session_id).await?;
        let result = self.graph.retreat_session(&mut session).await?;
        self.storage.save(session).await?;
        Ok(result)
    }

    /// Press "Start Over".
    pub async fn restart(&self, session_id: &str) -> Result<()> {
        let mut session = self.load(session_id).await?;
        self.graph.restart_session(&mut session).await?;
        self.storage.save(session).await
    }

    /// Form state of the session, for field edits between steps.
    pub async fn context(&self, session_id: &str) -> Result<Context> {
        Ok(self.load(session_id).await?.context)
    }

    /// Current screen of the session as text.
    pub async fn render(&self, session_id: &str) -> Result<String> {
        let session = self.load(session_id).await?;
        self.graph.render(&session)
    }

    pub async fn session(&self, session_id: &str) -> Result<Session> {
        self.load(session_id).await
    }

    async fn load(&self, session_id: &str) -> Result<Session> {
        self.storage
            .get(session_id)
            .await?
            .ok_or_else(|| GraphError::SessionNotFound(session_id.to_string()))
    }
}
