//! Post endpoints.
//!
//! Internal routes take the `X-API-Key` header; the public and preview
//! routes are anonymous and only ever return the public projection.

use actix_web::{HttpResponse, web};
use blogpost_core::DomainError;
use blogpost_core::ports::Page;
use blogpost_shared::dto::{
    ArchivePostRequest, CreatePostRequest, ListPostsQuery, PostListResponse, PostResponse,
    PreviewQuery, PublicListQuery, PublicPostListResponse, PublicPostQuery, PublicPostResponse,
    PublishPostRequest, UpdatePostRequest,
};
use blogpost_shared::{ErrorResponse, SuccessResponse, Validate};
use uuid::Uuid;

use super::mapping;
use crate::middleware::auth::ApiKey;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Create a post. The slug is derived from the title unless one is given.
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("ApiKeyAuth" = []))
)]
pub async fn create_post(
    _key: ApiKey,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    tracing::debug!(app_id = %req.app_id, run_id = %req.run_id, "Creating post");
    let post = state.posts.create(mapping::new_post(req)?).await?;

    Ok(HttpResponse::Created().json(PostResponse {
        post: mapping::blog_post(post),
    }))
}

/// Publish a draft.
#[utoipa::path(
    post,
    path = "/posts/{id}/publish",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = PublishPostRequest,
    responses(
        (status = 200, description = "Post published", body = PostResponse),
        (status = 400, description = "Invalid request or post already published", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("ApiKeyAuth" = []))
)]
pub async fn publish_post(
    _key: ApiKey,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PublishPostRequest>,
) -> AppResult<HttpResponse> {
    body.validate()?;
    let id = path.into_inner();

    tracing::debug!(post_id = %id, app_id = %body.app_id, run_id = %body.run_id, "Publishing post");
    let post = state.posts.publish(id).await?;

    Ok(HttpResponse::Ok().json(PostResponse {
        post: mapping::blog_post(post),
    }))
}

/// Update content and metadata. Status changes go through publish and archive.
#[utoipa::path(
    patch,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("ApiKeyAuth" = []))
)]
pub async fn update_post(
    _key: ApiKey,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;
    let id = path.into_inner();

    tracing::debug!(post_id = %id, app_id = %req.app_id, run_id = %req.run_id, "Updating post");
    let post = state.posts.update(id, mapping::post_changes(req)).await?;

    Ok(HttpResponse::Ok().json(PostResponse {
        post: mapping::blog_post(post),
    }))
}

/// Archive a post. Posts are never hard-deleted.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = ArchivePostRequest,
    responses(
        (status = 200, description = "Post archived", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("ApiKeyAuth" = []))
)]
pub async fn archive_post(
    _key: ApiKey,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ArchivePostRequest>,
) -> AppResult<HttpResponse> {
    body.validate()?;
    let id = path.into_inner();

    tracing::debug!(post_id = %id, app_id = %body.app_id, run_id = %body.run_id, "Archiving post");
    state.posts.archive(id).await?;

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// Internal listing across every status.
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Matching posts and their total", body = PostListResponse),
        (status = 400, description = "Missing appId or invalid filter", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("ApiKeyAuth" = []))
)]
pub async fn list_posts(
    _key: ApiKey,
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    query.validate()?;
    let filter = mapping::post_filter(&query)?;
    let page = Page::new(query.limit, query.offset);

    let list = state.posts.list(&filter, page).await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: list.posts.into_iter().map(mapping::blog_post).collect(),
        total: list.total,
    }))
}

/// Published posts of a site, most recently published first.
#[utoipa::path(
    get,
    path = "/posts/public",
    tag = "public",
    params(PublicListQuery),
    responses(
        (status = 200, description = "Published posts", body = PublicPostListResponse),
        (status = 400, description = "Missing targetSite", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn list_public_posts(
    state: web::Data<AppState>,
    query: web::Query<PublicListQuery>,
) -> AppResult<HttpResponse> {
    query.validate()?;
    let target_site = query.target_site.as_deref().unwrap_or_default();
    let page = Page::new(query.limit, query.offset);

    let posts = state.posts.list_public(target_site, page).await?;

    Ok(HttpResponse::Ok().json(PublicPostListResponse {
        posts: posts.into_iter().map(mapping::public_blog_post).collect(),
    }))
}

/// A single published post by slug.
#[utoipa::path(
    get,
    path = "/posts/public/{slug}",
    tag = "public",
    params(("slug" = String, Path, description = "Post slug"), PublicPostQuery),
    responses(
        (status = 200, description = "The post", body = PublicPostResponse),
        (status = 400, description = "Missing targetSite", body = ErrorResponse),
        (status = 404, description = "No published post with this slug", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_public_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PublicPostQuery>,
) -> AppResult<HttpResponse> {
    query.validate()?;
    let target_site = query.target_site.as_deref().unwrap_or_default();

    let post = state.posts.get_public(target_site, &path).await?;

    Ok(HttpResponse::Ok().json(PublicPostResponse {
        post: mapping::public_blog_post(post),
    }))
}

/// Preview a post of any status with its preview token.
#[utoipa::path(
    get,
    path = "/posts/preview/{id}",
    tag = "public",
    params(("id" = Uuid, Path, description = "Post id"), PreviewQuery),
    responses(
        (status = 200, description = "The post", body = PublicPostResponse),
        (status = 400, description = "Malformed post id", body = ErrorResponse),
        (status = 401, description = "Missing or wrong preview token", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn preview_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PreviewQuery>,
) -> AppResult<HttpResponse> {
    let Some(token) = query.token.as_deref().filter(|t| !t.is_empty()) else {
        return Err(AppError::Unauthorized("Preview token is required".to_string()));
    };

    let post = state
        .posts
        .preview(path.into_inner(), token)
        .await
        .map_err(|err| match err {
            DomainError::Unauthorized => AppError::Unauthorized("Invalid preview token".to_string()),
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(PublicPostResponse {
        post: mapping::public_blog_post(post),
    }))
}
