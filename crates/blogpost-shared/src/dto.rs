//! Data Transfer Objects - request/response types for the API.
//!
//! Every field is camelCase on the wire. Request bodies default missing
//! fields so that `validate()` can report all of them at once instead of
//! failing on the first one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::validation::{FieldErrors, Validate};

const CREATE_STATUSES: &[&str] = &["draft", "published"];
const ALL_STATUSES: &[&str] = &["draft", "published", "archived"];

// --- Requests ---

/// Body of `POST /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePostRequest {
    pub app_id: String,
    pub run_id: String,
    pub org_id: Option<String>,
    pub user_id: Option<String>,
    pub campaign_id: Option<String>,
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body_markdown: String,
    pub body_html: String,
    pub cover_image_url: Option<String>,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub target_site: String,
    /// `draft` (default) or `published`.
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub meta_description: Option<String>,
    pub og_image_url: Option<String>,
    pub source_type: Option<String>,
    pub source_message_id: Option<String>,
}

impl Validate for CreatePostRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("appId", &self.app_id);
        errors.require("runId", &self.run_id);
        errors.require("title", &self.title);
        errors.require("bodyMarkdown", &self.body_markdown);
        errors.require("bodyHtml", &self.body_html);
        errors.require("authorName", &self.author_name);
        errors.require("targetSite", &self.target_site);
        errors.one_of("status", self.status.as_deref(), CREATE_STATUSES);
        errors.into_result()
    }
}

/// Body of `POST /posts/{id}/publish`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishPostRequest {
    pub app_id: String,
    pub run_id: String,
}

impl Validate for PublishPostRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("appId", &self.app_id);
        errors.require("runId", &self.run_id);
        errors.into_result()
    }
}

/// Body of `DELETE /posts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ArchivePostRequest {
    pub app_id: String,
    pub run_id: String,
}

impl Validate for ArchivePostRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("appId", &self.app_id);
        errors.require("runId", &self.run_id);
        errors.into_result()
    }
}

/// Body of `PATCH /posts/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePostRequest {
    pub app_id: String,
    pub run_id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body_markdown: Option<String>,
    pub body_html: Option<String>,
    pub cover_image_url: Option<String>,
    pub author_name: Option<String>,
    pub author_avatar_url: Option<String>,
    pub target_site: Option<String>,
    /// Not accepted: use the publish and archive endpoints.
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub meta_description: Option<String>,
    pub og_image_url: Option<String>,
    pub source_type: Option<String>,
    pub source_message_id: Option<String>,
}

impl Validate for UpdatePostRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("appId", &self.app_id);
        errors.require("runId", &self.run_id);
        errors.reject_blank("title", self.title.as_deref());
        errors.reject_blank("slug", self.slug.as_deref());
        errors.reject_blank("bodyMarkdown", self.body_markdown.as_deref());
        errors.reject_blank("bodyHtml", self.body_html.as_deref());
        errors.reject_blank("authorName", self.author_name.as_deref());
        errors.reject_blank("targetSite", self.target_site.as_deref());
        if self.status.is_some() {
            errors.add(
                "status",
                "Status cannot be changed by an update; use the publish or archive endpoint",
            );
        }
        errors.into_result()
    }
}

// --- Query strings ---

/// Largest `offset` a listing accepts; SQL binds it as a signed 64-bit integer.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Query of `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListPostsQuery {
    /// Required.
    pub app_id: Option<String>,
    pub org_id: Option<String>,
    /// One of `draft`, `published`, `archived`.
    pub status: Option<String>,
    pub target_site: Option<String>,
    pub campaign_id: Option<String>,
    /// Page size, default 20, at most 100.
    pub limit: Option<u64>,
    /// Rows to skip, at most 9223372036854775807.
    pub offset: Option<u64>,
}

impl Validate for ListPostsQuery {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.app_id.as_deref().is_none_or(|v| v.trim().is_empty()) {
            errors.add("appId", "appId query parameter is required");
        }
        errors.one_of("status", self.status.as_deref(), ALL_STATUSES);
        errors.at_most("offset", self.offset, MAX_OFFSET);
        errors.into_result()
    }
}

/// Query of `GET /posts/public`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PublicListQuery {
    /// Required.
    pub target_site: Option<String>,
    pub limit: Option<u64>,
    /// Rows to skip, at most 9223372036854775807.
    pub offset: Option<u64>,
}

impl Validate for PublicListQuery {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_target_site(&mut errors, self.target_site.as_deref());
        errors.at_most("offset", self.offset, MAX_OFFSET);
        errors.into_result()
    }
}

/// Query of `GET /posts/public/{slug}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PublicPostQuery {
    /// Required.
    pub target_site: Option<String>,
}

impl Validate for PublicPostQuery {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_target_site(&mut errors, self.target_site.as_deref());
        errors.into_result()
    }
}

/// Query of `GET /posts/preview/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PreviewQuery {
    /// The post's preview token.
    pub token: Option<String>,
}

fn require_target_site(errors: &mut FieldErrors, target_site: Option<&str>) {
    if target_site.is_none_or(|v| v.trim().is_empty()) {
        errors.add("targetSite", "targetSite query parameter is required");
    }
}

// --- Responses ---

/// A post with every field, as seen by internal callers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub app_id: String,
    pub org_id: Option<String>,
    pub user_id: Option<String>,
    pub campaign_id: Option<String>,
    pub run_id: Option<String>,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body_markdown: String,
    pub body_html: String,
    pub cover_image_url: Option<String>,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub target_site: String,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub preview_token: Option<String>,
    pub meta_description: Option<String>,
    pub og_image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub source_type: Option<String>,
    pub source_message_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post without ownership, token or provenance fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicBlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body_markdown: String,
    pub body_html: String,
    pub cover_image_url: Option<String>,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub target_site: String,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub meta_description: Option<String>,
    pub og_image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub post: BlogPost,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicPostResponse {
    pub post: PublicBlogPost,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<BlogPost>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicPostListResponse {
    pub posts: Vec<PublicBlogPost>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_request_reports_every_missing_field() {
        let req: CreatePostRequest = serde_json::from_value(json!({ "appId": "test-app" })).unwrap();

        let errors = req.validate().unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();

        assert_eq!(
            fields,
            vec![
                "authorName",
                "bodyHtml",
                "bodyMarkdown",
                "runId",
                "targetSite",
                "title"
            ]
        );
    }

    #[test]
    fn create_request_rejects_archived_status() {
        let req = CreatePostRequest {
            app_id: "a".into(),
            run_id: "r".into(),
            title: "t".into(),
            body_markdown: "m".into(),
            body_html: "h".into(),
            author_name: "n".into(),
            target_site: "s".into(),
            status: Some("archived".into()),
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["status"]);
    }

    #[test]
    fn update_request_refuses_status() {
        let req: UpdatePostRequest = serde_json::from_value(json!({
            "appId": "a",
            "runId": "r",
            "title": "New title",
            "status": "published"
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["status"]);
    }

    #[test]
    fn list_query_requires_app_id() {
        let errors = ListPostsQuery::default().validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["appId"]);

        let ok = ListPostsQuery {
            app_id: Some("a".into()),
            status: Some("archived".into()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn listing_offsets_stay_in_signed_range() {
        let public = PublicListQuery {
            target_site: Some("x.com".into()),
            offset: Some(MAX_OFFSET + 1),
            ..Default::default()
        };
        assert_eq!(public.validate().unwrap_err().fields().collect::<Vec<_>>(), vec!["offset"]);

        let internal = ListPostsQuery {
            app_id: Some("a".into()),
            offset: Some(u64::MAX),
            ..Default::default()
        };
        assert_eq!(internal.validate().unwrap_err().fields().collect::<Vec<_>>(), vec!["offset"]);

        let edge = PublicListQuery {
            target_site: Some("x.com".into()),
            offset: Some(MAX_OFFSET),
            ..Default::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn public_post_serializes_without_internal_keys() {
        let post = PublicBlogPost {
            id: Uuid::new_v4(),
            title: "t".into(),
            slug: "t".into(),
            summary: None,
            body_markdown: "m".into(),
            body_html: "h".into(),
            cover_image_url: None,
            author_name: "n".into(),
            author_avatar_url: None,
            target_site: "s".into(),
            status: "published".into(),
            published_at: Some(Utc::now()),
            meta_description: None,
            og_image_url: None,
            tags: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(post).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "appId",
            "orgId",
            "userId",
            "campaignId",
            "runId",
            "previewToken",
            "sourceType",
            "sourceMessageId",
        ] {
            assert!(!object.contains_key(key), "{key} leaked");
        }
        assert!(object.contains_key("bodyHtml"));
        assert!(object.contains_key("publishedAt"));
    }
}
