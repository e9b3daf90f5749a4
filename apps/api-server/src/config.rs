//! Application configuration loaded from environment variables.

use std::env;

use blogpost_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    /// Shared secret for internal routes; `None` rejects every internal call.
    pub api_key: Option<String>,
    pub database: Option<DatabaseConfig>,
    pub run_migrations: bool,
    /// Server URL advertised in the OpenAPI document.
    pub public_base_url: String,
    /// Origins allowed to call the public and preview routes; `None` allows any.
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            service_name: "blog-posting-service".to_string(),
            api_key: None,
            database: None,
            run_migrations: true,
            public_base_url: "http://localhost:3000".to_string(),
            cors_allowed_origins: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database = non_empty("BLOG_POSTING_SERVICE_DATABASE_URL")
            .or_else(|| non_empty("DATABASE_URL"))
            .map(|url| DatabaseConfig {
                url,
                max_connections: parsed("DB_MAX_CONNECTIONS").unwrap_or(20),
                min_connections: parsed("DB_MIN_CONNECTIONS").unwrap_or(2),
            });

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: parsed("PORT").unwrap_or(defaults.port),
            service_name: non_empty("SERVICE_NAME").unwrap_or(defaults.service_name),
            api_key: non_empty("BLOG_POSTING_SERVICE_API_KEY"),
            database,
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.run_migrations),
            public_base_url: non_empty("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS")
                .and_then(|v| origin_list(&v))
                .or(defaults.cors_allowed_origins),
        }
    }
}

/// Comma-separated origins; `*` means any.
fn origin_list(raw: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        None
    } else {
        Some(origins)
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::origin_list;

    #[test]
    fn origin_list_parsing() {
        assert_eq!(
            origin_list("https://a.com, https://b.com ,"),
            Some(vec!["https://a.com".to_string(), "https://b.com".to_string()])
        );
        assert_eq!(origin_list("*"), None);
        assert_eq!(origin_list(" , "), None);
    }
}
