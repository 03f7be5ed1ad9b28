//! Tasks, enqueue options and the metadata handed back from the queue

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use asynq::base::keys::TaskState as BackendState;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{QueueError, QueueResult};

/// Queue used when none is given
pub const DEFAULT_QUEUE: &str = "default";

/// Retry budget used when none is given
pub const DEFAULT_MAX_RETRY: u32 = 25;

/// Header carrying the stored queue name; a dequeued task does not expose it otherwise
pub(crate) const QUEUE_HEADER: &str = "x-queue";
pub(crate) const MAX_RETRY_HEADER: &str = "x-max-retry";

/// A closed set of task types with a stable wire tag each.
///
/// ```rust,ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MailTask { Welcome }
///
/// impl TaskKind for MailTask {
///     fn type_name(self) -> &'static str {
///         match self { Self::Welcome => "mail:welcome" }
///     }
///
///     fn parse(type_name: &str) -> Option<Self> {
///         match type_name { "mail:welcome" => Some(Self::Welcome), _ => None }
///     }
/// }
/// ```
pub trait TaskKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    fn type_name(self) -> &'static str;

    fn parse(type_name: &str) -> Option<Self>;
}

/// A task ready to be enqueued: a kind and its encoded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task<K: TaskKind> {
    kind: K,
    payload: Vec<u8>,
}

impl<K: TaskKind> Task<K> {
    pub fn new(kind: K, payload: Vec<u8>) -> Self {
        Self { kind, payload }
    }

    /// Build a task whose payload is the JSON encoding of `payload`
    pub fn from_json<T: Serialize>(kind: K, payload: &T) -> QueueResult<Self> {
        Ok(Self::new(kind, serde_json::to_vec(payload)?))
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Backend task for `opts`, stored under `namespace`
pub(crate) fn backend_task(
    type_name: &str,
    payload: &[u8],
    opts: &EnqueueOptions,
    namespace: &Namespace,
) -> QueueResult<asynq::task::Task> {
    if opts.queue.trim().is_empty() {
        return Err(QueueError::Config("queue name must not be empty".to_string()));
    }
    let max_retry = i32::try_from(opts.max_retry)
        .map_err(|_| QueueError::Config(format!("max_retry out of range: {}", opts.max_retry)))?;

    let queue = namespace.qualify(&opts.queue);
    let headers = HashMap::from([
        (QUEUE_HEADER.to_string(), queue.clone()),
        (MAX_RETRY_HEADER.to_string(), opts.max_retry.to_string()),
    ]);

    Ok(asynq::task::Task::new(type_name, payload)?
        .with_queue(&queue)
        .with_max_retry(max_retry)
        .with_headers(headers))
}

/// Scheduling options for one enqueue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnqueueOptions {
    pub queue: String,
    pub max_retry: u32,
    /// Earliest processing time relative to enqueue
    pub process_in: Duration,
}

impl Default for EnqueueOptions {
    fn default() -> Self {
        Self {
            queue: DEFAULT_QUEUE.to_string(),
            max_retry: DEFAULT_MAX_RETRY,
            process_in: Duration::ZERO,
        }
    }
}

impl EnqueueOptions {
    #[must_use]
    pub fn queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = queue.into();
        self
    }

    #[must_use]
    pub fn max_retry(mut self, max_retry: u32) -> Self {
        self.max_retry = max_retry;
        self
    }

    #[must_use]
    pub fn process_in(mut self, delay: Duration) -> Self {
        self.process_in = delay;
        self
    }
}

/// Maps logical queue names onto the names stored in Redis.
///
/// Deployments (and test runs) sharing one Redis keep apart by namespace;
/// an empty namespace stores queues under their plain names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace(Option<String>);

impl Namespace {
    pub fn new(prefix: &str) -> Self {
        let prefix = prefix.trim();
        Self((!prefix.is_empty()).then(|| prefix.to_string()))
    }

    pub fn qualify(&self, queue: &str) -> String {
        match &self.0 {
            Some(ns) => format!("{ns}:{queue}"),
            None => queue.to_string(),
        }
    }

    /// Inverse of [`qualify`](Self::qualify); foreign names pass through
    pub fn strip<'a>(&self, queue: &'a str) -> &'a str {
        self.0
            .as_deref()
            .and_then(|ns| queue.strip_prefix(ns))
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(queue)
    }
}

/// Where a task sits in its queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Pending,
    Scheduled,
    Active,
    Retry,
    Archived,
    Completed,
    Aggregating,
}

impl From<BackendState> for TaskState {
    fn from(state: BackendState) -> Self {
        match state {
            BackendState::Pending => Self::Pending,
            BackendState::Scheduled => Self::Scheduled,
            BackendState::Active => Self::Active,
            BackendState::Retry => Self::Retry,
            BackendState::Archived => Self::Archived,
            BackendState::Completed => Self::Completed,
            BackendState::Aggregating => Self::Aggregating,
        }
    }
}

/// Receipt returned from an enqueue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    pub id: String,
    pub type_name: String,
    pub queue: String,
    pub max_retry: u32,
    /// Failed attempts so far
    pub retried: u32,
    pub state: TaskState,
    pub next_process_at: DateTime<Utc>,
}

impl TaskInfo {
    pub(crate) fn from_backend(info: asynq::task::TaskInfo, namespace: &Namespace) -> Self {
        Self {
            queue: namespace.strip(&info.queue).to_string(),
            id: info.id,
            type_name: info.task_type,
            max_retry: u32::try_from(info.max_retry).unwrap_or(0),
            retried: u32::try_from(info.retried).unwrap_or(0),
            state: info.state.into(),
            next_process_at: info.next_process_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Task metadata handed to handlers alongside the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContext {
    pub task_id: String,
    pub queue: String,
    pub retried: u32,
    pub max_retry: u32,
}

impl TaskContext {
    /// No attempts remain after this one fails
    pub fn is_last_attempt(&self) -> bool {
        self.retried >= self.max_retry
    }
}
