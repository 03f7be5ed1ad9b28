//! Queue errors and handler outcomes

use asynq::error::{Error as AsynqError, SkipRetryError};
use thiserror::Error;

/// Errors raised by the queue client and processor
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue backend error: {0}")]
    Backend(#[from] AsynqError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl QueueError {
    /// Backend failures that a later attempt may not hit
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Backend(e) if e.is_retriable())
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Failure returned by a task handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// Reschedule with backoff while retry budget remains
    #[error("{0}")]
    Retry(String),

    /// Archive immediately; the task can never succeed
    #[error("skip retry: {0}")]
    SkipRetry(String),
}

impl TaskError {
    pub fn retry(message: impl Into<String>) -> Self {
        Self::Retry(message.into())
    }

    pub fn skip_retry(message: impl Into<String>) -> Self {
        Self::SkipRetry(message.into())
    }

    pub fn is_skip_retry(&self) -> bool {
        matches!(self, Self::SkipRetry(_))
    }
}

/// The processor archives on `SkipRetry` and reschedules on anything else
impl From<TaskError> for AsynqError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Retry(message) => AsynqError::other(message),
            e @ TaskError::SkipRetry(_) => AsynqError::SkipRetry(SkipRetryError::new(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_error_display() {
        assert_eq!(TaskError::retry("db down").to_string(), "db down");
        assert_eq!(
            TaskError::skip_retry("bad payload").to_string(),
            "skip retry: bad payload"
        );
    }

    #[test]
    fn test_is_skip_retry() {
        assert!(TaskError::skip_retry("x").is_skip_retry());
        assert!(!TaskError::retry("x").is_skip_retry());
    }

    #[test]
    fn test_backend_error_mapping() {
        let skipped = AsynqError::from(TaskError::skip_retry("gone"));
        assert!(matches!(skipped, AsynqError::SkipRetry(_)));

        let retried = AsynqError::from(TaskError::retry("db down"));
        assert!(matches!(retried, AsynqError::Other { .. }));
        assert!(retried.to_string().contains("db down"));
    }

    #[test]
    fn test_transient_errors() {
        assert!(!QueueError::Config("no queues".to_string()).is_transient());
        assert!(!QueueError::Backend(AsynqError::config("bad")).is_transient());
    }
}
