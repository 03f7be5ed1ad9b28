//! Handler registration
//!
//! A [`HandlerTable`] maps each task kind to its handler. It is built once at
//! startup and moved into the [`Dispatcher`](crate::Dispatcher); nothing mutates it afterwards.

use std::borrow::Cow;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::error::TaskError;
use crate::task::{TaskContext, TaskKind};

/// Executes one task of a registered kind
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn process(&self, ctx: &TaskContext, payload: &[u8]) -> Result<(), TaskError>;
}

/// Adapter turning an async closure into a [`TaskHandler`]
pub struct HandlerFn<F>(F);

/// Wrap `f` as a handler. The closure receives owned copies of its inputs.
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(TaskContext, Vec<u8>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    HandlerFn(f)
}

#[async_trait]
impl<F, Fut> TaskHandler for HandlerFn<F>
where
    F: Fn(TaskContext, Vec<u8>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    async fn process(&self, ctx: &TaskContext, payload: &[u8]) -> Result<(), TaskError> {
        (self.0)(ctx.clone(), payload.to_vec()).await
    }
}

/// Kind-to-handler routing table
pub struct HandlerTable<K: TaskKind> {
    handlers: HashMap<K, Arc<dyn TaskHandler>>,
}

impl<K: TaskKind> Default for HandlerTable<K> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<K: TaskKind> std::fmt::Debug for HandlerTable<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.handlers.keys().map(|k| k.type_name()))
            .finish()
    }
}

impl<K: TaskKind> HandlerTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `kind`, replacing any earlier one
    #[must_use]
    pub fn register(mut self, kind: K, handler: impl TaskHandler + 'static) -> Self {
        self.handlers.insert(kind, Arc::new(handler));
        self
    }

    /// Register a shared handler
    #[must_use]
    pub fn register_arc(mut self, kind: K, handler: Arc<dyn TaskHandler>) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    pub fn get(&self, kind: K) -> Option<&Arc<dyn TaskHandler>> {
        self.handlers.get(&kind)
    }

    /// Resolve a stored task's wire tag to its handler
    pub fn resolve(&self, type_name: &str) -> Option<&Arc<dyn TaskHandler>> {
        K::parse(type_name).and_then(|kind| self.get(kind))
    }

    pub fn kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.handlers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// A task that failed for good, as reported to an [`ErrorHandler`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTask<'a> {
    pub context: &'a TaskContext,
    pub type_name: &'a str,
    pub payload: &'a [u8],
}

impl FailedTask<'_> {
    /// Payload rendered for logs
    pub fn payload_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.payload)
    }
}

/// Notified once per task that fails for good
pub trait ErrorHandler: Send + Sync {
    fn handle_error(&self, task: &FailedTask<'_>, error: &TaskError);
}

/// Default error handler: one structured error record per archived task
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorHandler;

impl ErrorHandler for LogErrorHandler {
    fn handle_error(&self, task: &FailedTask<'_>, error: &TaskError) {
        error!(
            task_id = %task.context.task_id,
            task_type = %task.type_name,
            payload = %task.payload_str(),
            queue = %task.context.queue,
            retried = task.context.retried,
            max_retry = task.context.max_retry,
            error = %error,
            "Task failed permanently"
        );
    }
}
