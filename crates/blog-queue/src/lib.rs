//! # blog-queue
//!
//! Typed task queue over [asynq](https://docs.rs/asynq), the Redis-backed
//! queue wire-compatible with Go asynq.
//!
//! - [`Client`] enqueues tasks, immediately or after a delay
//! - [`Processor`] serves weighted queues and runs the registered handlers
//! - [`TaskKind`] gives every task type a closed Rust enum and a stable wire tag
//!
//! Delivery is at-least-once: a task whose worker dies is recovered once its
//! lease lapses, so handlers must be idempotent.
//!
//! ## Example
//!
//! ```ignore
//! use blog_queue::{Client, EnqueueOptions, HandlerTable, Namespace, Processor, Task};
//!
//! let client = Client::connect(redis_url, Namespace::default()).await?;
//! client.enqueue(&Task::from_json(Kind::Ping, &payload)?, &EnqueueOptions::default()).await?;
//!
//! let handlers = HandlerTable::new().register(Kind::Ping, handler_fn(ping));
//! Processor::new(redis_url, Namespace::default(), handlers, ProcessorConfig::default())
//!     .run(shutdown_rx)
//!     .await?;
//! ```

pub mod client;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod processor;
pub mod task;

pub use client::{Client, Enqueue, QueueStats};
pub use dispatch::Dispatcher;
pub use error::{QueueError, QueueResult, TaskError};
pub use handler::{
    handler_fn, ErrorHandler, FailedTask, HandlerFn, HandlerTable, LogErrorHandler, TaskHandler,
};
pub use processor::{Processor, ProcessorConfig, QueuePriority};
pub use task::{
    EnqueueOptions, Namespace, Task, TaskContext, TaskInfo, TaskKind, TaskState, DEFAULT_MAX_RETRY,
    DEFAULT_QUEUE,
};
