//! # Blog Posting Service
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer};
use tracing_actix_web::TracingLogger;

use api_server::config::AppConfig;
use api_server::observability::RequestIdMiddleware;
use api_server::state::AppState;
use api_server::telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting {} on {}:{}",
        config.service_name,
        config.host,
        config.port
    );

    let state = AppState::new(&config).await?;

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(api_server::configure_app(state.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
