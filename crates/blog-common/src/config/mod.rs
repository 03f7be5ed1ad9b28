//! Configuration structs

mod app_config;

pub use app_config::{
    parse_queue_weights, AppConfig, AppSettings, CacheConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, JwtConfig, QueueConfig, QueueWeight, RateLimitConfig,
    RedisConfig, ServerConfig, WorkerConfig,
};
