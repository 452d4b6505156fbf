pub mod console;
pub mod context;
pub mod error;
pub mod graph;
pub mod runner;
pub mod storage;
pub mod task;
pub mod telemetry;

// Re-export commonly used types
pub use console::{Command, CommandExtension, Console};
pub use context::Context;
pub use error::{GraphError, Result};
pub use graph::{ExecutionResult, ExecutionStatus, Graph, GraphBuilder};
pub use runner::FlowRunner;
pub use storage::{InMemorySessionStorage, Session, SessionStorage};
pub use task::{NextAction, Task, TaskResult};
pub use telemetry::{LogFormat, init_tracing};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Screen that opens its gate once `field` is set
    struct FieldTask {
        id: String,
        field: &'static str,
    }

    #[async_trait]
    impl Task for FieldTask {
        fn id(&self) -> &str {
            &self.id
        }

        async fn run(&self, context: Context) -> Result<TaskResult> {
            if !context.contains(self.field) {
                return Ok(TaskResult::new(None, NextAction::WaitForInput));
            }
            Ok(TaskResult::new(None, NextAction::Continue))
        }

        fn render(&self, _context: &Context) -> String {
            format!("screen {}", self.id)
        }
    }

    struct DoneTask;

    #[async_trait]
    impl Task for DoneTask {
        fn id(&self) -> &str {
            "done"
        }

        async fn run(&self, context: Context) -> Result<TaskResult> {
            let name: String = context.get("name").await.unwrap_or_default();
            Ok(TaskResult::new(Some(format!("Thanks, {name}")), NextAction::End))
        }

        async fn back(&self, _context: Context) -> Result<NextAction> {
            Ok(NextAction::WaitForInput)
        }
    }

    fn field_task(id: &str, field: &'static str) -> Arc<FieldTask> {
        Arc::new(FieldTask {
            id: id.to_string(),
            field,
        })
    }

    fn linear_graph() -> Graph {
        GraphBuilder::new("test_graph")
            .add_task(field_task("name", "name"))
            .add_task(field_task("age", "age"))
            .add_task(Arc::new(DoneTask))
            .add_edge("name", "age")
            .add_edge("age", "done")
            .set_initial_context(|context| context.set_sync("country", "CA"))
            .build()
    }

    #[tokio::test]
    async fn closed_gate_makes_continue_a_noop() {
        let graph = linear_graph();
        let mut session = graph.start_session("s1").unwrap();

        let result = graph.execute_session(&mut session).await.unwrap();
        assert_eq!(result.status, ExecutionStatus::WaitingForInput);
        assert_eq!(session.current_task_id, "name");
        assert!(session.history.is_empty());

        session.context.set("name", "Ada").await;
        graph.execute_session(&mut session).await.unwrap();
        assert_eq!(session.current_task_id, "age");
        assert_eq!(session.history, vec!["name".to_string()]);
    }

    #[tokio::test]
    async fn walks_to_terminal_screen() {
        let graph = linear_graph();
        let mut session = graph.start_session("s1").unwrap();
        session.context.set("name", "Ada").await;
        session.context.set("age", 36).await;

        graph.execute_session(&mut session).await.unwrap();
        graph.execute_session(&mut session).await.unwrap();
        let result = graph.execute_session(&mut session).await.unwrap();

        assert_eq!(session.current_task_id, "done");
        assert_eq!(result.status, ExecutionStatus::Completed);
        assert_eq!(result.response.as_deref(), Some("Thanks, Ada"));
    }

    #[tokio::test]
    async fn back_pops_history_and_restarts_at_entry() {
        let graph = linear_graph();
        let mut session = graph.start_session("s1").unwrap();
        session.context.set("name", "Ada").await;
        graph.execute_session(&mut session).await.unwrap();

        graph.retreat_session(&mut session).await.unwrap();
        assert_eq!(session.current_task_id, "name");
        assert_eq!(session.context.get_sync::<String>("name").as_deref(), Some("Ada"));

        // Back on the entry screen starts over
        graph.retreat_session(&mut session).await.unwrap();
        assert_eq!(session.current_task_id, "name");
        assert!(!session.context.contains("name"));
        assert_eq!(session.context.get_sync::<String>("country").as_deref(), Some("CA"));
    }

    #[tokio::test]
    async fn task_can_refuse_back() {
        let graph = linear_graph();
        let mut session = graph.start_session("s1").unwrap();
        session.context.set("name", "Ada").await;
        session.context.set("age", 36).await;
        graph.execute_session(&mut session).await.unwrap();
        graph.execute_session(&mut session).await.unwrap();

        graph.retreat_session(&mut session).await.unwrap();
        assert_eq!(session.current_task_id, "done");
    }

    #[tokio::test]
    async fn restart_resets_fields_and_position() {
        let graph = linear_graph();
        let mut session = graph.start_session("s1").unwrap();
        session.context.set("name", "Ada").await;
        session.context.set("country", "FR").await;
        graph.execute_session(&mut session).await.unwrap();

        graph.restart_session(&mut session).await.unwrap();
        graph.retreat_session(&mut session).await.unwrap();
        graph.execute_session(&mut session).await.unwrap();

        assert_eq!(session.current_task_id, "name");
        assert!(session.history.is_empty());
        assert_eq!(session.context.snapshot().len(), 1);
        assert_eq!(session.context.get_sync::<String>("country").as_deref(), Some("CA"));
    }

    struct StatusTask;

    #[async_trait]
    impl Task for StatusTask {
        fn id(&self) -> &str {
            "status"
        }

        async fn run(&self, context: Context) -> Result<TaskResult> {
            if !context.contains("ready") {
                return Ok(TaskResult::new(None, NextAction::WaitForInput));
            }
            Ok(TaskResult::new_with_status(
                None,
                NextAction::Continue,
                Some("Ready".to_string()),
            ))
        }
    }

    #[tokio::test]
    async fn closed_gate_keeps_status_message() {
        let graph = GraphBuilder::new("status")
            .add_task(Arc::new(StatusTask))
            .add_task(field_task("name", "name"))
            .add_edge("status", "name")
            .build();

        let mut session = graph.start_session("s1").unwrap();
        session.status_message = Some("Welcome back".to_string());

        graph.execute_session(&mut session).await.unwrap();
        assert_eq!(session.status_message.as_deref(), Some("Welcome back"));
        assert_eq!(session.current_task_id, "status");

        session.context.set("ready", true).await;
        graph.execute_session(&mut session).await.unwrap();
        assert_eq!(session.status_message.as_deref(), Some("Ready"));
        assert_eq!(session.current_task_id, "name");
    }

    struct ChainTask;

    #[async_trait]
    impl Task for ChainTask {
        fn id(&self) -> &str {
            "chain"
        }

        async fn run(&self, _context: Context) -> Result<TaskResult> {
            Ok(TaskResult::new(None, NextAction::ContinueAndExecute))
        }
    }

    struct HomeTask;

    #[async_trait]
    impl Task for HomeTask {
        fn id(&self) -> &str {
            "loop"
        }

        async fn run(&self, _context: Context) -> Result<TaskResult> {
            Ok(TaskResult::new(None, NextAction::GoTo("name".to_string())))
        }
    }

    #[tokio::test]
    async fn goto_earlier_screen_unwinds_history() {
        let graph = GraphBuilder::new("looping")
            .add_task(field_task("name", "name"))
            .add_task(Arc::new(HomeTask))
            .add_edge("name", "loop")
            .build();

        let mut session = graph.start_session("s1").unwrap();
        session.context.set("name", "Ada").await;
        graph.execute_session(&mut session).await.unwrap();
        assert_eq!(session.current_task_id, "loop");

        graph.execute_session(&mut session).await.unwrap();
        assert_eq!(session.current_task_id, "name");
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn continue_and_execute_runs_next_task() {
        let graph = GraphBuilder::new("chained")
            .add_task(Arc::new(ChainTask))
            .add_task(Arc::new(DoneTask))
            .add_edge("chain", "done")
            .build();

        let mut session = graph.start_session("s1").unwrap();
        session.context.set("name", "Ada").await;
        let result = graph.execute_session(&mut session).await.unwrap();

        assert_eq!(result.status, ExecutionStatus::Completed);
        assert_eq!(session.current_task_id, "done");
        assert_eq!(session.history, vec!["chain".to_string()]);
    }

    #[tokio::test]
    async fn runner_persists_between_steps() {
        let graph = Arc::new(linear_graph());
        let storage = Arc::new(InMemorySessionStorage::new());
        let runner = FlowRunner::new(graph, storage);

        let session_id = runner.start("session1").await.unwrap();
        runner.context(&session_id).await.unwrap().set("name", "Ada").await;
        runner.run(&session_id).await.unwrap();

        let session = runner.session(&session_id).await.unwrap();
        assert_eq!(session.current_task_id, "age");
        assert_eq!(runner.render(&session_id).await.unwrap(), "screen age");

        let missing = runner.run("nope").await;
        assert!(matches!(missing, Err(GraphError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn console_drives_session_from_text() {
        let graph = Arc::new(linear_graph());
        let runner = FlowRunner::new(graph, Arc::new(InMemorySessionStorage::new()));
        let session_id = runner.start("console").await.unwrap();
        let console = Console::new(runner.clone(), session_id.clone());

        let input = "next\nset name Ada\nnext\nbogus\nset age 36\nnext\nnext\nquit\nnext\n";
        let mut output = Vec::new();
        console.run(input.as_bytes(), &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("screen age"));
        assert!(output.contains("Unknown command `bogus`"));
        assert!(output.contains("Thanks, Ada"));
        assert_eq!(runner.session(&session_id).await.unwrap().current_task_id, "done");
    }
}
