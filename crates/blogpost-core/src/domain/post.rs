use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Lifecycle status of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            other => Err(DomainError::Validation(format!(
                "unknown post status '{other}'"
            ))),
        }
    }
}

/// Post entity - a blog post stored on behalf of a client application.
///
/// Ownership (`app_id` .. `run_id`), `preview_token` and the source fields
/// are internal; see [`PublicPost`](super::PublicPost) for what anonymous
/// readers get.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
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

    pub status: PostStatus,
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

/// Input for creating a post, already validated by the transport layer.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
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
    pub status: Option<PostStatus>,
    pub tags: Option<Vec<String>>,
    pub meta_description: Option<String>,
    pub og_image_url: Option<String>,
    pub source_type: Option<String>,
    pub source_message_id: Option<String>,
}

/// Content and metadata changes for an existing post.
///
/// `None` leaves the stored value untouched. Status is deliberately absent:
/// it only moves through [`Post::publish`] and [`Post::archive`].
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body_markdown: Option<String>,
    pub body_html: Option<String>,
    pub cover_image_url: Option<String>,
    pub author_name: Option<String>,
    pub author_avatar_url: Option<String>,
    pub target_site: Option<String>,
    pub tags: Option<Vec<String>>,
    pub meta_description: Option<String>,
    pub og_image_url: Option<String>,
    pub source_type: Option<String>,
    pub source_message_id: Option<String>,
}

impl Post {
    /// Create a new post with a resolved slug and a fresh preview token.
    ///
    /// Starts as a draft unless `published` was requested, in which case
    /// `published_at` is stamped with `now` as well.
    pub fn new(input: NewPost, slug: String, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let status = Self::initial_status(input.status)?;
        let published_at = (status == PostStatus::Published).then_some(now);

        Ok(Self {
            id: Uuid::new_v4(),
            app_id: input.app_id,
            org_id: input.org_id,
            user_id: input.user_id,
            campaign_id: input.campaign_id,
            run_id: Some(input.run_id),
            title: input.title,
            slug,
            summary: input.summary,
            body_markdown: input.body_markdown,
            body_html: input.body_html,
            cover_image_url: input.cover_image_url,
            author_name: input.author_name,
            author_avatar_url: input.author_avatar_url,
            target_site: input.target_site,
            status,
            published_at,
            preview_token: Some(Uuid::new_v4().to_string()),
            meta_description: input.meta_description,
            og_image_url: input.og_image_url,
            tags: input.tags,
            source_type: input.source_type,
            source_message_id: input.source_message_id,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::sample_input;

    #[test]
    fn new_post_defaults_to_draft_with_token() {
        let now = Utc::now();
        let post = Post::new(sample_input(), "my-first-post".to_string(), now).unwrap();

        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.published_at.is_none());
        assert!(post.preview_token.is_some());
        assert_eq!(post.run_id.as_deref(), Some("test-run"));
        assert_eq!(post.created_at, now);
        assert_eq!(post.updated_at, now);
    }

    #[test]
    fn new_post_requested_as_published_is_stamped() {
        let now = Utc::now();
        let input = NewPost {
            status: Some(PostStatus::Published),
            ..sample_input()
        };
        let post = Post::new(input, "my-first-post".to_string(), now).unwrap();

        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.published_at, Some(now));
    }

    #[test]
    fn new_post_cannot_start_archived() {
        let input = NewPost {
            status: Some(PostStatus::Archived),
            ..sample_input()
        };
        let result = Post::new(input, "slug".to_string(), Utc::now());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn status_parses_from_wire_names() {
        assert_eq!("draft".parse::<PostStatus>().unwrap(), PostStatus::Draft);
        assert_eq!(
            "archived".parse::<PostStatus>().unwrap(),
            PostStatus::Archived
        );
        assert!("Published".parse::<PostStatus>().is_err());
        assert_eq!(PostStatus::Published.to_string(), "published");
    }
}
