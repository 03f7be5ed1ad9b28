//! Producer side: turns reactions into queued tasks

use std::sync::Arc;
use std::time::Duration;

use blog_queue::{Enqueue, EnqueueOptions, QueueError, Task, TaskInfo};
use tracing::instrument;

use super::payload::{CommentTaskKind, ReactionPayload};

/// Reactions go to the high-priority queue
pub const REACTION_QUEUE: &str = "critical";
pub const REACTION_MAX_RETRY: u32 = 10;
/// Delay before a reaction becomes eligible for processing
pub const REACTION_DELAY: Duration = Duration::from_secs(5);

/// Scheduling used for every like and dislike
pub fn reaction_options() -> EnqueueOptions {
    EnqueueOptions::default()
        .queue(REACTION_QUEUE)
        .max_retry(REACTION_MAX_RETRY)
        .process_in(REACTION_DELAY)
}

/// Enqueues comment tasks
#[derive(Clone)]
pub struct CommentTaskDistributor {
    queue: Arc<dyn Enqueue>,
}

impl std::fmt::Debug for CommentTaskDistributor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentTaskDistributor").finish_non_exhaustive()
    }
}

impl CommentTaskDistributor {
    pub fn new(queue: Arc<dyn Enqueue>) -> Self {
        Self { queue }
    }

    /// Serialize `payload` and enqueue it as a `kind` task
    ///
    /// # Errors
    /// Serialization or queue failure. Nothing is enqueued in either case.
    #[instrument(skip(self, opts))]
    pub async fn distribute(
        &self,
        kind: CommentTaskKind,
        payload: &ReactionPayload,
        opts: &EnqueueOptions,
    ) -> Result<TaskInfo, QueueError> {
        let task = Task::from_json(kind, payload)?;
        self.queue
            .enqueue_raw(task.type_name(), task.payload(), opts)
            .await
    }

    pub async fn distribute_like(&self, payload: &ReactionPayload) -> Result<TaskInfo, QueueError> {
        self.distribute(CommentTaskKind::Like, payload, &reaction_options())
            .await
    }

    pub async fn distribute_dislike(
        &self,
        payload: &ReactionPayload,
    ) -> Result<TaskInfo, QueueError> {
        self.distribute(CommentTaskKind::Dislike, payload, &reaction_options())
            .await
    }
}
