//! Conversions between wire DTOs and domain types.

use blogpost_core::domain::{NewPost, Post, PostChanges, PostStatus, PublicPost};
use blogpost_core::ports::PostFilter;
use blogpost_shared::dto::{
    BlogPost, CreatePostRequest, ListPostsQuery, PublicBlogPost, UpdatePostRequest,
};

use crate::middleware::error::AppError;

fn parse_status(status: Option<&str>) -> Result<Option<PostStatus>, AppError> {
    status
        .map(|s| s.parse::<PostStatus>())
        .transpose()
        .map_err(AppError::from)
}

pub fn new_post(req: CreatePostRequest) -> Result<NewPost, AppError> {
    Ok(NewPost {
        status: parse_status(req.status.as_deref())?,
        app_id: req.app_id,
        run_id: req.run_id,
        org_id: req.org_id,
        user_id: req.user_id,
        campaign_id: req.campaign_id,
        title: req.title,
        slug: req.slug,
        summary: req.summary,
        body_markdown: req.body_markdown,
        body_html: req.body_html,
        cover_image_url: req.cover_image_url,
        author_name: req.author_name,
        author_avatar_url: req.author_avatar_url,
        target_site: req.target_site,
        tags: req.tags,
        meta_description: req.meta_description,
        og_image_url: req.og_image_url,
        source_type: req.source_type,
        source_message_id: req.source_message_id,
    })
}

pub fn post_changes(req: UpdatePostRequest) -> PostChanges {
    PostChanges {
        title: req.title,
        slug: req.slug,
        summary: req.summary,
        body_markdown: req.body_markdown,
        body_html: req.body_html,
        cover_image_url: req.cover_image_url,
        author_name: req.author_name,
        author_avatar_url: req.author_avatar_url,
        target_site: req.target_site,
        tags: req.tags,
        meta_description: req.meta_description,
        og_image_url: req.og_image_url,
        source_type: req.source_type,
        source_message_id: req.source_message_id,
    }
}

pub fn post_filter(query: &ListPostsQuery) -> Result<PostFilter, AppError> {
    Ok(PostFilter {
        app_id: query.app_id.clone().unwrap_or_default(),
        org_id: query.org_id.clone(),
        status: parse_status(query.status.as_deref())?,
        target_site: query.target_site.clone(),
        campaign_id: query.campaign_id.clone(),
    })
}

pub fn blog_post(post: Post) -> BlogPost {
    BlogPost {
        id: post.id,
        app_id: post.app_id,
        org_id: post.org_id,
        user_id: post.user_id,
        campaign_id: post.campaign_id,
        run_id: post.run_id,
        title: post.title,
        slug: post.slug,
        summary: post.summary,
        body_markdown: post.body_markdown,
        body_html: post.body_html,
        cover_image_url: post.cover_image_url,
        author_name: post.author_name,
        author_avatar_url: post.author_avatar_url,
        target_site: post.target_site,
        status: post.status.to_string(),
        published_at: post.published_at,
        preview_token: post.preview_token,
        meta_description: post.meta_description,
        og_image_url: post.og_image_url,
        tags: post.tags,
        source_type: post.source_type,
        source_message_id: post.source_message_id,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn public_blog_post(post: PublicPost) -> PublicBlogPost {
    PublicBlogPost {
        id: post.id,
        title: post.title,
        slug: post.slug,
        summary: post.summary,
        body_markdown: post.body_markdown,
        body_html: post.body_html,
        cover_image_url: post.cover_image_url,
        author_name: post.author_name,
        author_avatar_url: post.author_avatar_url,
        target_site: post.target_site,
        status: post.status.to_string(),
        published_at: post.published_at,
        meta_description: post.meta_description,
        og_image_url: post.og_image_url,
        tags: post.tags,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}
