//! Health check endpoint.

use actix_web::{HttpResponse, web};
use blogpost_shared::dto::HealthResponse;

use crate::state::AppState;

/// Health check endpoint - returns server status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        service: state.service_name.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    };

    HttpResponse::Ok().json(response)
}

/// The OpenAPI document, built once at startup.
pub async fn openapi_json(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.openapi.as_ref())
}
