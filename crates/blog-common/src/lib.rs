//! # blog-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, JwtService,
    PasswordService, TokenPair, TokenType,
};
pub use config::{
    AppConfig, AppSettings, CacheConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, QueueConfig, QueueWeight, RateLimitConfig, RedisConfig, ServerConfig,
    WorkerConfig,
};
pub use error::{domain_status, AppError};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
