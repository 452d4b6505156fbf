use thiserror::Error;

/// Errors raised while driving a wizard graph
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Context error: {0}")]
    ContextError(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
