//! # Blog Posting Infrastructure
//!
//! Concrete implementations of the ports defined in `blogpost-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL post repository via SeaORM
//! - `rate-limit` - Per-client rate limiting via governor

pub mod database;
pub mod memory;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - In-Memory
pub use memory::InMemoryPostRepository;

pub use database::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, connect};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
