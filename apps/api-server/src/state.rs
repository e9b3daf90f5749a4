//! Application state - shared across all handlers.

use std::sync::Arc;

use blogpost_core::PostService;
use blogpost_core::ports::{PostRepository, RateLimiter};
use blogpost_infra::InMemoryPostRepository;
use utoipa::openapi::OpenApi;

use crate::config::AppConfig;
use crate::openapi;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub api_key: Option<Arc<str>>,
    pub rate_limiter: Option<Arc<dyn RateLimiter>>,
    pub cors_allowed_origins: Option<Arc<[String]>>,
    pub openapi: Arc<OpenApi>,
    pub service_name: Arc<str>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A configured but unreachable database is an error; only a missing
    /// database URL selects the in-memory store.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let repo = Self::post_repository(config).await?;

        if config.api_key.is_none() {
            tracing::warn!(
                "BLOG_POSTING_SERVICE_API_KEY not set. Internal routes will reject every request."
            );
        }

        let state = Self::from_parts(repo, config).with_rate_limiter(Self::rate_limiter());

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// State backed by a fresh in-memory store, without rate limiting.
    pub fn in_memory(api_key: Option<&str>) -> Self {
        let config = AppConfig {
            api_key: api_key.map(str::to_string),
            ..AppConfig::default()
        };
        Self::from_parts(Arc::new(InMemoryPostRepository::new()), &config)
    }

    pub fn from_parts(repo: Arc<dyn PostRepository>, config: &AppConfig) -> Self {
        Self {
            posts: PostService::new(repo),
            api_key: config.api_key.as_deref().map(Arc::from),
            rate_limiter: None,
            cors_allowed_origins: config.cors_allowed_origins.as_deref().map(Arc::from),
            openapi: Arc::new(openapi::build(&config.public_base_url)),
            service_name: Arc::from(config.service_name.as_str()),
        }
    }

    pub fn with_rate_limiter(mut self, limiter: Option<Arc<dyn RateLimiter>>) -> Self {
        self.rate_limiter = limiter;
        self
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn PostRepository>> {
        use anyhow::Context;
        use blogpost_infra::PostgresPostRepository;
        use migration::{Migrator, MigratorTrait};

        let Some(db_config) = &config.database else {
            tracing::warn!(
                "BLOG_POSTING_SERVICE_DATABASE_URL not set. Running without database (in-memory mode)."
            );
            return Ok(Arc::new(InMemoryPostRepository::new()));
        };

        let conn = blogpost_infra::connect(db_config)
            .await
            .context("failed to connect to database")?;

        if config.run_migrations {
            Migrator::up(&conn, None)
                .await
                .context("failed to apply migrations")?;
            tracing::info!("Migrations applied");
        }

        Ok(Arc::new(PostgresPostRepository::new(conn)))
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn PostRepository>> {
        if config.database.is_some() {
            tracing::warn!("Built without postgres feature - ignoring database URL");
        }
        tracing::info!("Running without postgres feature - using in-memory repository");
        Ok(Arc::new(InMemoryPostRepository::new()))
    }

    #[cfg(feature = "rate-limit")]
    fn rate_limiter() -> Option<Arc<dyn RateLimiter>> {
        use blogpost_infra::{InMemoryRateLimiter, RateLimitConfig};

        Some(Arc::new(InMemoryRateLimiter::new(RateLimitConfig::from_env())))
    }

    #[cfg(not(feature = "rate-limit"))]
    fn rate_limiter() -> Option<Arc<dyn RateLimiter>> {
        None
    }
}
