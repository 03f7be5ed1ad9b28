//! Application configuration structs
//!
//! Loaded from environment variables (optionally seeded from a `.env` file).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub cache: CacheConfig,
    pub queue: QueueConfig,
    pub worker: WorkerConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" | "local" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a connection from the pool
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Seconds before an idle connection is closed
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    /// Apply pending migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Read-through cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_blog_ttl")]
    pub blog_ttl_secs: u64,
    #[serde(default = "default_cache_prefix")]
    pub key_prefix: String,
}

impl CacheConfig {
    #[must_use]
    pub fn blog_ttl(&self) -> Duration {
        Duration::from_secs(self.blog_ttl_secs)
    }
}

/// A named priority queue and its polling weight
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueueWeight {
    pub name: String,
    pub weight: u32,
}

/// Task queue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Prefix for every queue name; empty stores queues under their plain names
    #[serde(default)]
    pub namespace: String,
    #[serde(default = "default_queue_weights")]
    pub weights: Vec<QueueWeight>,
}

/// Task processor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Maximum tasks processed at once
    #[serde(default = "default_worker_concurrency")]
    pub concurrency: usize,
    /// Sleep between polls when every queue is empty
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Grace period for in-flight tasks on shutdown
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
    /// How often due tasks are forwarded and orphaned tasks recovered
    #[serde(default = "default_maintenance_interval")]
    pub maintenance_interval_secs: u64,
    /// Run a processor inside the API process as well
    #[serde(default)]
    pub embedded: bool,
}

impl WorkerConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    #[must_use]
    pub fn maintenance_interval(&self) -> Duration {
        Duration::from_secs(self.maintenance_interval_secs)
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_worker_concurrency(),
            poll_interval_ms: default_poll_interval_ms(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            maintenance_interval_secs: default_maintenance_interval(),
            embedded: false,
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "blog-server".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_true() -> bool {
    true
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    604800 // 7 days
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_blog_ttl() -> u64 {
    3600
}

fn default_cache_prefix() -> String {
    "blog-api".to_string()
}

fn default_queue_weights() -> Vec<QueueWeight> {
    vec![
        QueueWeight {
            name: "critical".to_string(),
            weight: 10,
        },
        QueueWeight {
            name: "default".to_string(),
            weight: 5,
        },
    ]
}

fn default_worker_concurrency() -> usize {
    10
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_shutdown_timeout() -> u64 {
    8
}

fn default_maintenance_interval() -> u64 {
    5
}

/// Read an optional variable, falling back to `default` when unset or unparsable
fn var_or<T: FromStr>(key: &str, default: impl FnOnce() -> T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(default)
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

/// Parse `name:weight,name:weight`
///
/// # Errors
/// Returns `InvalidValue` on a malformed entry, a zero weight, or an empty list
pub fn parse_queue_weights(raw: &str) -> Result<Vec<QueueWeight>, ConfigError> {
    let invalid = |why: &str| ConfigError::InvalidValue("QUEUE_WEIGHTS", format!("{raw:?}: {why}"));

    let weights = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, weight) = entry
                .split_once(':')
                .ok_or_else(|| invalid("expected name:weight"))?;
            let weight: u32 = weight
                .trim()
                .parse()
                .map_err(|_| invalid("weight is not a number"))?;
            if weight == 0 {
                return Err(invalid("weight must be positive"));
            }
            Ok(QueueWeight {
                name: name.trim().to_string(),
                weight,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if weights.is_empty() {
        return Err(invalid("no queues configured"));
    }
    Ok(weights)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let weights = match env::var("QUEUE_WEIGHTS") {
            Ok(raw) => parse_queue_weights(&raw)?,
            Err(_) => default_queue_weights(),
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: var_or("API_PORT", default_port),
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: var_or("DATABASE_MAX_CONNECTIONS", default_max_connections),
                min_connections: var_or("DATABASE_MIN_CONNECTIONS", default_min_connections),
                connect_timeout_secs: var_or("DATABASE_CONNECT_TIMEOUT", default_connect_timeout),
                idle_timeout_secs: var_or("DATABASE_IDLE_TIMEOUT", default_idle_timeout),
                run_migrations: var_or("DATABASE_RUN_MIGRATIONS", default_true),
            },
            redis: RedisConfig {
                url: required("REDIS_URL")?,
                max_connections: var_or("REDIS_POOL_SIZE", default_redis_max_connections),
            },
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                access_token_expiry: var_or("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry),
                refresh_token_expiry: var_or(
                    "JWT_REFRESH_TOKEN_EXPIRY",
                    default_refresh_token_expiry,
                ),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: var_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                ),
                burst: var_or("RATE_LIMIT_BURST", default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            cache: CacheConfig {
                blog_ttl_secs: var_or("CACHE_BLOG_TTL_SECS", default_blog_ttl),
                key_prefix: env::var("CACHE_KEY_PREFIX").unwrap_or_else(|_| default_cache_prefix()),
            },
            queue: QueueConfig {
                namespace: env::var("QUEUE_NAMESPACE").unwrap_or_default(),
                weights,
            },
            worker: WorkerConfig {
                concurrency: var_or("WORKER_CONCURRENCY", default_worker_concurrency).max(1),
                poll_interval_ms: var_or("WORKER_POLL_INTERVAL_MS", default_poll_interval_ms),
                shutdown_timeout_secs: var_or(
                    "WORKER_SHUTDOWN_TIMEOUT_SECS",
                    default_shutdown_timeout,
                ),
                maintenance_interval_secs: var_or(
                    "WORKER_MAINTENANCE_INTERVAL_SECS",
                    default_maintenance_interval,
                )
                .max(1),
                embedded: var_or("WORKER_EMBEDDED", || false),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
