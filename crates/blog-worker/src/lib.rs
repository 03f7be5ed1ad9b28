//! # blog-worker
//!
//! Runs the comment reaction processor against the shared Redis queue.
//!
//! The API only enqueues `comment:like` / `comment:dislike` tasks; this
//! process dequeues them and writes the reaction rows. Several workers may
//! run side by side. A running task stays leased for as long as its worker
//! heartbeats; a task held by a crashed worker is recovered once the lease
//! lapses.

use std::sync::Arc;

use anyhow::Context;
use blog_common::AppConfig;
use blog_db::{create_pool, DatabaseConfig, PgUserCommentRepository};
use blog_queue::{Client, Namespace, Processor, ProcessorConfig};
use blog_service::{comment_handlers, CommentTaskKind};
use tokio::sync::watch;
use tracing::{info, warn};

/// Build the reaction processor over the configured Redis
pub fn build_processor(pool: blog_db::PgPool, config: &AppConfig) -> Processor<CommentTaskKind> {
    let reactions = Arc::new(PgUserCommentRepository::new(pool));
    Processor::new(
        config.redis.url.clone(),
        Namespace::new(&config.queue.namespace),
        comment_handlers(reactions),
        ProcessorConfig::from_config(&config.queue, &config.worker),
    )
}

/// What the binary was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Process tasks until a shutdown signal
    Run,
    /// Move every archived task back to pending, then exit
    RequeueArchived,
}

impl Command {
    /// Parse the first command-line argument; none means `Run`
    pub fn parse(arg: Option<&str>) -> anyhow::Result<Self> {
        match arg {
            None | Some("run") => Ok(Self::Run),
            Some("requeue-archived") => Ok(Self::RequeueArchived),
            Some(other) => anyhow::bail!("unknown command {other:?}, expected run or requeue-archived"),
        }
    }
}

/// Re-enqueue archived tasks on every configured queue with a fresh retry budget
pub async fn requeue_archived(config: &AppConfig) -> anyhow::Result<usize> {
    let client = Client::from_config(&config.redis, &config.queue)
        .await
        .context("failed to connect to Redis")?;
    client.ping().await.context("Redis is unreachable")?;

    let mut total = 0;
    for queue in &config.queue.weights {
        let moved = client
            .requeue_archived(&queue.name)
            .await
            .with_context(|| format!("failed to requeue archived tasks on {}", queue.name))?;
        total += moved;
    }
    Ok(total)
}

/// Log the size of every served queue
async fn log_queue_stats(client: &Client, config: &ProcessorConfig) {
    for queue in &config.queues {
        match client.queue_stats(&queue.name).await {
            Ok(stats) => {
                info!(
                    queue = %stats.queue,
                    pending = stats.pending,
                    active = stats.active,
                    scheduled = stats.scheduled,
                    retry = stats.retry,
                    archived = stats.archived,
                    "Queue status"
                );
                if stats.archived > 0 {
                    warn!(queue = %stats.queue, archived = stats.archived, "Queue has archived tasks");
                }
            }
            Err(e) => warn!(queue = %queue.name, error = %e, "Failed to read queue status"),
        }
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Run the processor until a shutdown signal, then drain in-flight tasks
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .context("failed to connect to PostgreSQL")?;

    info!("Connecting to Redis...");
    let client = Client::from_config(&config.redis, &config.queue)
        .await
        .context("failed to connect to Redis")?;
    client.ping().await.context("Redis is unreachable")?;

    let processor = build_processor(pool, &config);
    log_queue_stats(&client, processor.config()).await;

    info!(
        concurrency = processor.config().concurrency,
        queues = ?processor.config().queues,
        namespace = ?processor.namespace(),
        "Task processor starting"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut handle = tokio::spawn(processor.run(shutdown_rx));

    let finished = tokio::select! {
        () = shutdown_signal() => None,
        result = &mut handle => Some(result),
    };

    let result = match finished {
        Some(result) => result,
        None => {
            let _ = shutdown_tx.send(true);
            handle.await
        }
    };

    result.context("task processor panicked")??;
    info!("Task processor stopped");
    Ok(())
}
