//! Producer side of the queue

use std::sync::Arc;

use async_trait::async_trait;
use asynq::backend::{RedisConnectionType, RedisInspector};
use asynq::inspector::InspectorTrait;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::QueueResult;
use crate::task::{backend_task, EnqueueOptions, Namespace, Task, TaskInfo, TaskKind};

/// Task counts per state for one queue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    pub queue: String,
    pub pending: usize,
    pub active: usize,
    pub scheduled: usize,
    pub retry: usize,
    pub archived: usize,
}

impl QueueStats {
    /// Tasks not yet completed or archived
    pub fn outstanding(&self) -> usize {
        self.pending + self.active + self.scheduled + self.retry
    }
}

fn count(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

/// Anything that can durably accept a task.
///
/// [`Client`] is the production implementation; services hold this trait so
/// they can be exercised without Redis.
#[async_trait]
pub trait Enqueue: Send + Sync {
    async fn enqueue_raw(
        &self,
        type_name: &'static str,
        payload: &[u8],
        opts: &EnqueueOptions,
    ) -> QueueResult<TaskInfo>;
}

/// Enqueues tasks and exposes operator actions on queues
#[derive(Clone)]
pub struct Client {
    inner: asynq::client::Client,
    inspector: Arc<RedisInspector>,
    namespace: Namespace,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Connect to the Redis at `redis_url`, storing queues under `namespace`
    pub async fn connect(redis_url: &str, namespace: Namespace) -> QueueResult<Self> {
        let redis = RedisConnectionType::single(redis_url)?;
        let inner = asynq::client::Client::new(redis.clone()).await?;
        let inspector = Arc::new(RedisInspector::new(redis).await?);
        Ok(Self {
            inner,
            inspector,
            namespace,
        })
    }

    pub async fn from_config(
        redis: &blog_common::RedisConfig,
        queue: &blog_common::QueueConfig,
    ) -> QueueResult<Self> {
        Self::connect(&redis.url, Namespace::new(&queue.namespace)).await
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Durably store `task`. Tasks with a non-zero `process_in` stay scheduled until due.
    pub async fn enqueue<K: TaskKind>(
        &self,
        task: &Task<K>,
        opts: &EnqueueOptions,
    ) -> QueueResult<TaskInfo> {
        self.enqueue_raw(task.type_name(), task.payload(), opts).await
    }

    pub async fn queue_stats(&self, queue: &str) -> QueueResult<QueueStats> {
        let stats = self
            .inspector
            .get_queue_stats(&self.namespace.qualify(queue))
            .await?;
        Ok(QueueStats {
            queue: queue.to_string(),
            pending: count(stats.pending),
            active: count(stats.active),
            scheduled: count(stats.scheduled),
            retry: count(stats.retry),
            archived: count(stats.archived),
        })
    }

    /// Current state of one task
    pub async fn task_info(&self, queue: &str, task_id: &str) -> QueueResult<TaskInfo> {
        let info = self
            .inspector
            .get_task_info(&self.namespace.qualify(queue), task_id)
            .await?;
        Ok(TaskInfo::from_backend(info, &self.namespace))
    }

    /// Give every archived task of `queue` a fresh retry budget and make it pending
    #[instrument(skip(self))]
    pub async fn requeue_archived(&self, queue: &str) -> QueueResult<usize> {
        let moved = self
            .inspector
            .requeue_all_archived_tasks(&self.namespace.qualify(queue))
            .await?;
        let count = count(moved);
        info!(queue, count, "Requeued archived tasks");
        Ok(count)
    }

    /// Check Redis connectivity
    pub async fn ping(&self) -> QueueResult<()> {
        Ok(self.inner.ping().await?)
    }
}

#[async_trait]
impl Enqueue for Client {
    #[instrument(skip(self, payload), fields(queue = %opts.queue))]
    async fn enqueue_raw(
        &self,
        type_name: &'static str,
        payload: &[u8],
        opts: &EnqueueOptions,
    ) -> QueueResult<TaskInfo> {
        let backend = backend_task(type_name, payload, opts, &self.namespace)?;
        let stored = if opts.process_in.is_zero() {
            self.inner.enqueue(backend).await?
        } else {
            self.inner.enqueue_in(backend, opts.process_in).await?
        };
        let info = TaskInfo::from_backend(stored, &self.namespace);

        info!(
            task_id = %info.id,
            task_type = %info.type_name,
            payload = %String::from_utf8_lossy(payload),
            queue = %info.queue,
            max_retry = info.max_retry,
            "Enqueued task"
        );
        Ok(info)
    }
}
