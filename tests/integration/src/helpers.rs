//! Test helpers for integration tests
//!
//! Spawns test servers, makes HTTP requests, and checks responses.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use blog_api::{create_app, create_app_state};
use blog_common::AppConfig;
use blog_queue::{Client as QueueClient, Namespace, Processor, ProcessorConfig};
use blog_service::comment_handlers;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::fixtures::unique_suffix;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    queue: QueueClient,
    queues: Vec<String>,
    _handle: JoinHandle<()>,
    _worker: Option<(watch::Sender<bool>, JoinHandle<()>)>,
}

impl TestServer {
    /// Start the API alone. Reaction tasks are enqueued but never run.
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?, false).await
    }

    /// Start the API plus a task processor sharing its queue
    pub async fn start_with_worker() -> Result<Self> {
        Self::start_with_config(test_config()?, true).await
    }

    pub async fn start_with_config(config: AppConfig, with_worker: bool) -> Result<Self> {
        let state = create_app_state(config).await?;

        let queue = QueueClient::from_config(&state.config().redis, &state.config().queue).await?;
        let queues = state
            .config()
            .queue
            .weights
            .iter()
            .map(|w| w.name.clone())
            .collect();

        let worker = if with_worker {
            let config = state.config();
            let mut processor_config = ProcessorConfig::from_config(&config.queue, &config.worker);
            processor_config.poll_interval = Duration::from_millis(100);
            processor_config.maintenance_interval = Duration::from_millis(200);

            let processor = Processor::new(
                config.redis.url.clone(),
                Namespace::new(&config.queue.namespace),
                comment_handlers(state.service_context().user_comment_repo_arc()),
                processor_config,
            );

            let (tx, rx) = watch::channel(false);
            let handle = tokio::spawn(async move {
                processor.run(rx).await.ok();
            });
            Some((tx, handle))
        } else {
            None
        };

        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            blog_api::serve(listener, app, std::future::pending()).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            queue,
            queues,
            _handle: handle,
            _worker: worker,
        })
    }

    /// Tasks enqueued on this server's queues that are not yet done or archived
    pub async fn outstanding_tasks(&self) -> Result<usize> {
        let mut total = 0;
        for name in &self.queues {
            // a queue that never received a task has no stats yet
            if let Ok(stats) = self.queue.queue_stats(name).await {
                total += stats.outstanding();
            }
        }
        Ok(total)
    }

    pub async fn archived_tasks(&self, queue: &str) -> Result<usize> {
        Ok(self.queue.queue_stats(queue).await?.archived)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// PATCH with no body, as used by like/dislike
    pub async fn patch_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }
}

/// Configuration from the environment, isolated per server: each server gets
/// its own queue namespace and a rate limit tests never hit.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    config.queue.namespace = format!("blog-test-{}-{}", std::process::id(), unique_suffix());
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 1000;
    config.worker.embedded = false;

    Ok(config)
}

/// Integration tests need a live PostgreSQL and Redis
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    if std::env::var("JWT_SECRET").is_err() {
        eprintln!("Skipping test: JWT_SECRET not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Poll `check` until it returns `Some`, or fail after `timeout`
pub async fn eventually<T, F, Fut>(timeout: Duration, mut check: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<Option<T>>>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(value) = check().await? {
            return Ok(value);
        }
        if tokio::time::Instant::now() >= deadline {
            anyhow::bail!("condition not met within {timeout:?}");
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
}
