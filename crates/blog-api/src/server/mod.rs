//! Server setup and initialization
//!
//! Wires pools, repositories and services into [`AppState`], builds the router
//! and runs it until a shutdown signal. With `WORKER_EMBEDDED=true` a task
//! processor runs in the same process and is drained on shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use blog_cache::{RedisBlogCache, RedisPool};
use blog_common::{AppConfig, AppError, JwtService};
use blog_db::{
    create_pool, run_migrations, DatabaseConfig, PgBlogRepository, PgCommentRepository,
    PgUserCommentRepository, PgUserRepository,
};
use blog_queue::{Client, Namespace, Processor, ProcessorConfig};
use blog_service::{comment_handlers, CommentTaskDistributor, ServiceContext};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let router = apply_middleware(
        api.merge(health_routes()),
        &config.cors,
        config.app.env.is_production(),
    );

    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("migration failed: {e}")))?;
    }

    info!("Connecting to Redis...");
    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool created");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let queue = Client::from_config(&config.redis, &config.queue)
        .await
        .map_err(|e| AppError::QueueUnavailable(e.to_string()))?;
    let distributor = CommentTaskDistributor::new(Arc::new(queue));

    let service_context = ServiceContext::builder()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .blog_repo(Arc::new(PgBlogRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .user_comment_repo(Arc::new(PgUserCommentRepository::new(pool.clone())))
        .blog_cache(Arc::new(RedisBlogCache::from_config(
            redis_pool.clone(),
            &config.cache,
        )))
        .jwt_service(jwt_service)
        .distributor(distributor)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool, redis_pool))
}

/// Start a task processor inside the API process
fn spawn_embedded_processor(
    state: &AppState,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let config = state.config();
    let processor = Processor::new(
        config.redis.url.clone(),
        Namespace::new(&config.queue.namespace),
        comment_handlers(state.service_context().user_comment_repo_arc()),
        ProcessorConfig::from_config(&config.queue, &config.worker),
    );

    info!(
        concurrency = processor.config().concurrency,
        "Starting embedded task processor"
    );

    tokio::spawn(async move {
        if let Err(e) = processor.run(shutdown).await {
            error!(error = %e, "Embedded task processor stopped with error");
        }
    })
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM
pub async fn shutdown_signal() {
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

/// Serve `app` on an already-bound listener until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), AppError> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;
    let embedded = config.worker.embedded;

    let state = create_app_state(config).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let processor = embedded.then(|| spawn_embedded_processor(&state, shutdown_rx));

    let app = create_app(state)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;
    info!("Server listening on http://{}", addr);

    let result = serve(listener, app, shutdown_signal()).await;

    // The HTTP server is down; stop the processor and let it drain.
    let _ = shutdown_tx.send(true);
    if let Some(handle) = processor {
        if let Err(e) = handle.await {
            error!(error = %e, "Embedded task processor panicked");
        }
    }

    info!("Server stopped");
    result
}
