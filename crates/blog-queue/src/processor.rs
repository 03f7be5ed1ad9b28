//! Worker pool
//!
//! A [`Processor`] runs an asynq server over the configured queues and hands
//! every delivery to its [`Dispatcher`]. The server owns delivery:
//!
//! - queues are polled by weight, so a lighter queue is never starved
//! - an active task's lease is extended by heartbeat while its handler runs;
//!   the recoverer only reclaims tasks whose worker stopped heartbeating
//! - failures are rescheduled with exponential backoff until the retry budget
//!   is spent or the handler asks to skip retry, then archived

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use asynq::backend::RedisConnectionType;
use asynq::server::{ServerBuilder, ServerConfig};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::dispatch::Dispatcher;
use crate::error::{QueueError, QueueResult};
use crate::handler::{ErrorHandler, HandlerTable};
use crate::task::{Namespace, TaskKind};

/// A queue name and its polling weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuePriority {
    pub name: String,
    pub weight: u32,
}

impl QueuePriority {
    pub fn new(name: impl Into<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Processor settings
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Maximum tasks handled at once
    pub concurrency: usize,
    pub queues: Vec<QueuePriority>,
    /// Sleep when every queue is empty
    pub poll_interval: Duration,
    /// Grace period for in-flight tasks on shutdown
    pub shutdown_timeout: Duration,
    /// How often due tasks are forwarded and orphaned leases recovered
    pub maintenance_interval: Duration,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            queues: vec![
                QueuePriority::new("critical", 10),
                QueuePriority::new("default", 5),
            ],
            poll_interval: Duration::from_secs(1),
            shutdown_timeout: Duration::from_secs(8),
            maintenance_interval: Duration::from_secs(5),
        }
    }
}

impl ProcessorConfig {
    /// Build from blog-common config
    pub fn from_config(
        queue: &blog_common::QueueConfig,
        worker: &blog_common::WorkerConfig,
    ) -> Self {
        Self {
            concurrency: worker.concurrency,
            queues: queue
                .weights
                .iter()
                .map(|w| QueuePriority::new(w.name.clone(), w.weight))
                .collect(),
            poll_interval: worker.poll_interval(),
            shutdown_timeout: worker.shutdown_timeout(),
            maintenance_interval: worker.maintenance_interval(),
        }
    }

    fn validate(&self) -> QueueResult<()> {
        if self.concurrency == 0 {
            return Err(QueueError::Config("concurrency must be at least 1".to_string()));
        }
        if self.queues.is_empty() {
            return Err(QueueError::Config("at least one queue is required".to_string()));
        }
        if self.queues.iter().any(|q| q.weight == 0) {
            return Err(QueueError::Config("queue weights must be positive".to_string()));
        }
        if self.queues.iter().any(|q| q.name.trim().is_empty()) {
            return Err(QueueError::Config("queue names must not be empty".to_string()));
        }
        Ok(())
    }

    /// Server settings with every queue stored under `namespace`
    fn server_config(&self, namespace: &Namespace) -> ServerConfig {
        let queues: HashMap<String, i32> = self
            .queues
            .iter()
            .map(|q| {
                let weight = i32::try_from(q.weight).unwrap_or(i32::MAX);
                (namespace.qualify(&q.name), weight)
            })
            .collect();

        ServerConfig::new()
            .concurrency(self.concurrency)
            .queues(queues)
            .strict_priority(false)
            .task_check_interval(self.poll_interval)
            .delayed_task_check_interval(self.maintenance_interval)
            .janitor_interval(self.maintenance_interval)
            .shutdown_timeout(self.shutdown_timeout)
    }
}

/// Long-running worker pool over one Redis
pub struct Processor<K: TaskKind> {
    redis_url: String,
    namespace: Namespace,
    dispatcher: Dispatcher<K>,
    config: ProcessorConfig,
}

impl<K: TaskKind> Processor<K> {
    pub fn new(
        redis_url: impl Into<String>,
        namespace: Namespace,
        handlers: HandlerTable<K>,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            redis_url: redis_url.into(),
            dispatcher: Dispatcher::new(handlers, namespace.clone()),
            namespace,
            config,
        }
    }

    /// Replace the default logging error handler
    #[must_use]
    pub fn with_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.dispatcher = self.dispatcher.with_error_handler(Arc::new(handler));
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Process tasks until `shutdown` turns true or its sender is dropped.
    ///
    /// On shutdown no new tasks are taken. In-flight tasks get
    /// `shutdown_timeout` to finish; the rest go back to pending.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> QueueResult<()> {
        self.config.validate()?;

        if self.dispatcher.handlers().is_empty() {
            warn!("Processor started with no registered handlers");
        }

        let redis = RedisConnectionType::single(self.redis_url.as_str())?;
        let mut server = ServerBuilder::new()
            .redis_config(redis)
            .server_config(self.config.server_config(&self.namespace))
            .build()
            .await?;

        info!(
            concurrency = self.config.concurrency,
            queues = ?self.config.queues,
            namespace = ?self.namespace,
            handlers = ?self.dispatcher.handlers(),
            "Starting task processor"
        );

        // the server also stops on its own Ctrl-C listener
        let outcome = tokio::select! {
            result = server.start(self.dispatcher.clone()) => result,
            () = shutdown_requested(&mut shutdown) => Ok(()),
        };

        info!("Task processor draining");
        server.shutdown().await?;
        outcome?;
        info!("Task processor stopped");
        Ok(())
    }
}

/// Resolves once `rx` reads true or its sender is gone
async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            return;
        }
    }
}
