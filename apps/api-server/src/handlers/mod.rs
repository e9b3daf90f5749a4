//! HTTP handlers and route configuration.

pub mod health;
mod mapping;
pub mod posts;

use actix_web::web;

use crate::middleware::cors::public_cors;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Configure all application routes.
///
/// The public and preview scopes are registered before `/posts/{id}` and
/// sit behind the rate limiter, with CORS outermost so throttled responses
/// still carry CORS headers.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    let limiter = &state.rate_limiter;
    let origins = state.cors_allowed_origins.as_deref();

    cfg.route("/health", web::get().to(health::health_check))
        .route("/openapi.json", web::get().to(health::openapi_json))
        .service(
            web::scope("/posts")
                .service(
                    web::scope("/public")
                        .wrap(RateLimitMiddleware::new(limiter.clone()))
                        .wrap(public_cors(origins))
                        .route("", web::get().to(posts::list_public_posts))
                        .route("/{slug}", web::get().to(posts::get_public_post)),
                )
                .service(
                    web::scope("/preview")
                        .wrap(RateLimitMiddleware::new(limiter.clone()))
                        .wrap(public_cors(origins))
                        .route("/{id}", web::get().to(posts::preview_post)),
                )
                .service(
                    web::resource("")
                        .route(web::post().to(posts::create_post))
                        .route(web::get().to(posts::list_posts)),
                )
                .route("/{id}/publish", web::post().to(posts::publish_post))
                .service(
                    web::resource("/{id}")
                        .route(web::patch().to(posts::update_post))
                        .route(web::delete().to(posts::archive_post)),
                ),
        );
}
