//! Routes dequeued tasks to their handlers
//!
//! The backend calls [`Dispatcher::process_task`] once per delivery. The
//! dispatcher rebuilds the [`TaskContext`], runs the handler registered for the
//! task's kind and reports permanent failures to the [`ErrorHandler`] before
//! handing the outcome back. The backend then acknowledges, reschedules with
//! backoff, or archives.

use std::sync::Arc;

use async_trait::async_trait;
use asynq::server::Handler;
use tracing::{debug, warn};

use crate::error::TaskError;
use crate::handler::{ErrorHandler, FailedTask, HandlerTable, LogErrorHandler};
use crate::task::{
    Namespace, TaskContext, TaskKind, DEFAULT_MAX_RETRY, DEFAULT_QUEUE, MAX_RETRY_HEADER,
    QUEUE_HEADER,
};

/// Backend handler that dispatches on task kind
pub struct Dispatcher<K: TaskKind> {
    handlers: Arc<HandlerTable<K>>,
    error_handler: Arc<dyn ErrorHandler>,
    namespace: Namespace,
}

impl<K: TaskKind> Clone for Dispatcher<K> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            error_handler: Arc::clone(&self.error_handler),
            namespace: self.namespace.clone(),
        }
    }
}

impl<K: TaskKind> std::fmt::Debug for Dispatcher<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl<K: TaskKind> Dispatcher<K> {
    pub fn new(handlers: HandlerTable<K>, namespace: Namespace) -> Self {
        Self {
            handlers: Arc::new(handlers),
            error_handler: Arc::new(LogErrorHandler),
            namespace,
        }
    }

    /// Replace the default [`LogErrorHandler`]
    #[must_use]
    pub fn with_error_handler(mut self, error_handler: Arc<dyn ErrorHandler>) -> Self {
        self.error_handler = error_handler;
        self
    }

    pub fn handlers(&self) -> &HandlerTable<K> {
        &self.handlers
    }

    /// Task id, queue and retry position of a delivered task
    async fn context(&self, task: &asynq::task::Task) -> TaskContext {
        let headers = task.get_headers();
        let stored_queue = headers
            .get(QUEUE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_QUEUE)
            .to_string();
        let mut max_retry = headers
            .get(MAX_RETRY_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_RETRY);
        let task_id = task
            .result_writer()
            .map(|w| w.task_id().to_string())
            .unwrap_or_default();

        // retry count lives only in the stored task
        let mut retried = 0;
        if let Some(inspector) = task.inspector().filter(|_| !task_id.is_empty()) {
            match inspector.get_task_info(&stored_queue, &task_id).await {
                Ok(info) => {
                    retried = u32::try_from(info.retried).unwrap_or(0);
                    max_retry = u32::try_from(info.max_retry).unwrap_or(max_retry);
                }
                Err(e) => warn!(task_id = %task_id, error = %e, "Failed to read task retry state"),
            }
        }

        TaskContext {
            task_id,
            queue: self.namespace.strip(&stored_queue).to_string(),
            retried,
            max_retry,
        }
    }

    /// Run the handler for one delivery and report the outcome
    pub async fn dispatch(&self, task: &asynq::task::Task) -> Result<(), TaskError> {
        let ctx = self.context(task).await;
        let result = match self.handlers.resolve(task.get_type()) {
            Some(handler) => handler.process(&ctx, task.get_payload()).await,
            None => Err(TaskError::skip_retry(format!(
                "no handler registered for task type {}",
                task.get_type()
            ))),
        };

        match &result {
            Ok(()) => debug!(task_id = %ctx.task_id, task_type = %task.get_type(), "Task completed"),
            Err(err) if err.is_skip_retry() || ctx.is_last_attempt() => {
                let failed = FailedTask {
                    context: &ctx,
                    type_name: task.get_type(),
                    payload: task.get_payload(),
                };
                self.error_handler.handle_error(&failed, err);
            }
            Err(err) => warn!(
                task_id = %ctx.task_id,
                task_type = %task.get_type(),
                retried = ctx.retried,
                max_retry = ctx.max_retry,
                error = %err,
                "Task failed, will retry"
            ),
        }
        result
    }
}

#[async_trait]
impl<K: TaskKind> Handler for Dispatcher<K> {
    async fn process_task(&self, task: asynq::task::Task) -> asynq::error::Result<()> {
        Ok(self.dispatch(&task).await?)
    }
}
