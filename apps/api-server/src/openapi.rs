//! OpenAPI document.

use blogpost_shared::dto::{
    ArchivePostRequest, BlogPost, CreatePostRequest, HealthResponse, PostListResponse,
    PostResponse, PublicBlogPost, PublicPostListResponse, PublicPostResponse, PublishPostRequest,
    UpdatePostRequest,
};
use blogpost_shared::{ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi};

use crate::handlers::{health, posts};
use crate::middleware::auth::API_KEY_HEADER;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Posting Service",
        description = "Stores blog posts for client applications and serves the published ones per target site."
    ),
    paths(
        health::health_check,
        posts::create_post,
        posts::publish_post,
        posts::update_post,
        posts::archive_post,
        posts::list_posts,
        posts::list_public_posts,
        posts::get_public_post,
        posts::preview_post,
    ),
    components(schemas(
        CreatePostRequest,
        PublishPostRequest,
        UpdatePostRequest,
        ArchivePostRequest,
        BlogPost,
        PublicBlogPost,
        PostResponse,
        PublicPostResponse,
        PostListResponse,
        PublicPostListResponse,
        SuccessResponse,
        HealthResponse,
        ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "posts", description = "Internal post management, API key required"),
        (name = "public", description = "Anonymous read access"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "ApiKeyAuth",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}

/// Build the document advertised at `/openapi.json`.
pub fn build(public_base_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(public_base_url)]);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_and_the_key_scheme() {
        let doc = build("http://localhost:3000");
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/health",
            "/posts",
            "/posts/{id}",
            "/posts/{id}/publish",
            "/posts/public",
            "/posts/public/{slug}",
            "/posts/preview/{id}",
        ] {
            assert!(paths.contains(&path), "{path} missing");
        }

        let json = doc.to_json().unwrap();
        assert!(json.contains("ApiKeyAuth"));
        assert!(json.contains("X-API-Key"));
    }
}
