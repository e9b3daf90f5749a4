//! What anonymous readers may see.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::post::{Post, PostStatus};
use crate::error::DomainError;

/// Public projection of a post.
///
/// Ownership fields, the preview token and provenance fields have no
/// counterpart here, so they cannot leak through a public response.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicPost {
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
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub meta_description: Option<String>,
    pub og_image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PublicPost {
    fn from(post: Post) -> Self {
        Self {
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
            status: post.status,
            published_at: post.published_at,
            meta_description: post.meta_description,
            og_image_url: post.og_image_url,
            tags: post.tags,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl Post {
    /// Whether the post shows up in the public listing of `target_site`.
    pub fn is_public_on(&self, target_site: &str) -> bool {
        self.status == PostStatus::Published && self.target_site == target_site
    }

    /// Unlock a post of any status with its preview token.
    ///
    /// A missing stored token never matches.
    pub fn preview_with(self, token: &str) -> Result<PublicPost, DomainError> {
        match self.preview_token.as_deref() {
            Some(stored) if stored == token => Ok(self.into()),
            _ => Err(DomainError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{draft_post, published_post};

    #[test]
    fn only_published_posts_on_their_site_are_public() {
        let published = published_post();
        assert!(published.is_public_on("x.com"));
        assert!(!published.is_public_on("y.com"));

        let draft = draft_post();
        assert!(!draft.is_public_on("x.com"));

        let mut archived = published_post();
        archived.archive(Utc::now());
        assert!(!archived.is_public_on("x.com"));
    }

    #[test]
    fn preview_with_matching_token_returns_draft() {
        let post = draft_post();
        let token = post.preview_token.clone().unwrap();

        let public = post.clone().preview_with(&token).unwrap();

        assert_eq!(public.id, post.id);
        assert_eq!(public.status, PostStatus::Draft);
    }

    #[test]
    fn preview_with_wrong_token_is_unauthorized() {
        let post = draft_post();
        assert!(matches!(
            post.preview_with("not-the-token"),
            Err(DomainError::Unauthorized)
        ));
    }

    #[test]
    fn preview_without_stored_token_is_unauthorized() {
        let mut post = draft_post();
        post.preview_token = None;
        assert!(matches!(
            post.preview_with(""),
            Err(DomainError::Unauthorized)
        ));
    }
}
