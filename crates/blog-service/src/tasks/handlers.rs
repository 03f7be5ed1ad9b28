//! Consumer side: applies reaction tasks to the reaction store
//!
//! Failure classification:
//! - undecodable payload, nil ids, or a user or comment that no longer
//!   exists are permanent and skip retry
//! - anything else (database unavailable and the like) is retried

use std::sync::Arc;

use async_trait::async_trait;
use blog_core::traits::UserCommentRepository;
use blog_queue::{HandlerTable, TaskContext, TaskError, TaskHandler};
use tracing::{info, instrument};

use crate::services::{ReactionService, ServiceError};

use super::payload::{CommentTaskKind, ReactionPayload};

/// Handles one kind of reaction task
pub struct ReactionTaskHandler {
    kind: CommentTaskKind,
    reactions: Arc<dyn UserCommentRepository>,
}

impl ReactionTaskHandler {
    pub fn new(kind: CommentTaskKind, reactions: Arc<dyn UserCommentRepository>) -> Self {
        Self { kind, reactions }
    }
}

#[async_trait]
impl TaskHandler for ReactionTaskHandler {
    #[instrument(skip_all, fields(task_id = %ctx.task_id, kind = ?self.kind, retried = ctx.retried))]
    async fn process(&self, ctx: &TaskContext, payload: &[u8]) -> Result<(), TaskError> {
        let payload: ReactionPayload = serde_json::from_slice(payload)
            .map_err(|e| TaskError::skip_retry(format!("invalid reaction payload: {e}")))?;

        let service = ReactionService::with_repo(self.reactions.as_ref());
        let changed = match self.kind {
            CommentTaskKind::Like => service.like(payload.user_id, payload.comment_id).await,
            CommentTaskKind::Dislike => service.dislike(payload.user_id, payload.comment_id).await,
        }
        .map_err(classify)?;

        info!(
            user_id = %payload.user_id,
            comment_id = %payload.comment_id,
            changed,
            "Reaction processed"
        );
        Ok(())
    }
}

fn classify(err: ServiceError) -> TaskError {
    let permanent = match &err {
        ServiceError::Validation(_) => true,
        ServiceError::Domain(e) => e.is_not_found() || e.is_validation(),
        _ => false,
    };

    if permanent {
        TaskError::skip_retry(err.to_string())
    } else {
        TaskError::retry(err.to_string())
    }
}

/// Handler table for every comment task kind, sharing one reaction store
pub fn comment_handlers(reactions: Arc<dyn UserCommentRepository>) -> HandlerTable<CommentTaskKind> {
    CommentTaskKind::ALL
        .into_iter()
        .fold(HandlerTable::new(), |table, kind| {
            table.register(kind, ReactionTaskHandler::new(kind, Arc::clone(&reactions)))
        })
}
