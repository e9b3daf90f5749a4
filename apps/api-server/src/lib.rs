//! # Blog Posting Service API
//!
//! Actix-web application: routes, middleware and shared state. The binary
//! in `main.rs` wires it to configuration and starts the server.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod openapi;
pub mod state;
pub mod telemetry;

use actix_web::web;

use middleware::error::{json_config, not_found, path_config, query_config};
use state::AppState;

/// Register state, extractor configuration, routes and the 404 fallback.
///
/// Wrap the resulting app in [`observability::RequestIdMiddleware`] so
/// error bodies carry the request ID.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        handlers::configure_routes(cfg, &state);

        cfg.app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .default_service(web::to(not_found));
    }
}
