//! Post service - every read and write operation of the service.
//!
//! Handlers call into this type after their input has been validated; it
//! combines the slug, lifecycle and visibility rules with the repository.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostChanges, PublicPost, SlugCandidate};
use crate::error::DomainError;
use crate::ports::{Page, PostFilter, PostRepository};

/// A page of the internal listing plus the size of the whole result.
#[derive(Debug, Clone)]
pub struct PostList {
    pub posts: Vec<Post>,
    pub total: u64,
}

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Create a post, deriving and deduplicating its slug when none was given.
    ///
    /// Slug resolution reads the taken slugs once and then inserts; two
    /// concurrent creates with the same title on one site can both pick the
    /// same suffix. That window is accepted: there is no storage-level
    /// uniqueness on (slug, target_site), since caller-supplied slugs are
    /// stored verbatim even when they collide.
    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        let candidate = SlugCandidate::for_post(&input.title, input.slug.as_deref());

        let slug = if candidate.needs_dedup() {
            let taken = self
                .repo
                .slugs_with_prefix(&input.target_site, candidate.as_str())
                .await?;
            candidate.resolve(&taken)
        } else {
            candidate.resolve::<String>(&[])
        };

        let post = Post::new(input, slug, Utc::now())?;
        let post = self.repo.insert(post).await?;

        tracing::info!(
            post_id = %post.id,
            slug = %post.slug,
            target_site = %post.target_site,
            status = %post.status,
            "Post created"
        );

        Ok(post)
    }

    /// Move a draft to published.
    ///
    /// The current row is checked against the status graph first so the
    /// caller gets a specific conflict; the write itself only succeeds while
    /// the row is still a draft.
    pub async fn publish(&self, id: Uuid) -> Result<Post, DomainError> {
        let now = Utc::now();
        self.load(id).await?.publish(now)?;

        let Some(post) = self.repo.publish_draft(id, now).await? else {
            // Moved on (or vanished) between the read and the write.
            self.load(id).await?.publish(now)?;
            return Err(DomainError::Conflict("Post is no longer a draft".to_string()));
        };

        tracing::info!(post_id = %post.id, target_site = %post.target_site, "Post published");
        Ok(post)
    }

    /// Update content and metadata fields; status never changes here.
    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, DomainError> {
        let post = self
            .repo
            .update_fields(id, &changes, Utc::now())
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    /// Archive (soft delete) a post.
    pub async fn archive(&self, id: Uuid) -> Result<Post, DomainError> {
        let post = self
            .repo
            .archive(id, Utc::now())
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        tracing::info!(post_id = %post.id, "Post archived");
        Ok(post)
    }

    /// Internal listing across all statuses.
    pub async fn list(&self, filter: &PostFilter, page: Page) -> Result<PostList, DomainError> {
        let (posts, total) = self.repo.list(filter, page).await?;
        tracing::debug!(app_id = %filter.app_id, returned = posts.len(), total, "Listed posts");
        Ok(PostList { posts, total })
    }

    /// Published posts of one site, projected for anonymous readers.
    pub async fn list_public(
        &self,
        target_site: &str,
        page: Page,
    ) -> Result<Vec<PublicPost>, DomainError> {
        let posts = self.repo.list_published(target_site, page).await?;

        Ok(posts
            .into_iter()
            .filter(|post| post.is_public_on(target_site))
            .map(PublicPost::from)
            .collect())
    }

    /// A single published post by slug.
    pub async fn get_public(&self, target_site: &str, slug: &str) -> Result<PublicPost, DomainError> {
        self.repo
            .find_published_by_slug(target_site, slug)
            .await?
            .filter(|post| post.is_public_on(target_site))
            .map(PublicPost::from)
            .ok_or_else(|| DomainError::post_not_found(slug))
    }

    /// Any post, whatever its status, unlocked by its preview token.
    ///
    /// An unknown id is `NotFound`; a known id with the wrong token is
    /// `Unauthorized`.
    pub async fn preview(&self, id: Uuid, token: &str) -> Result<PublicPost, DomainError> {
        let post = self.load(id).await?;
        post.preview_with(token).inspect_err(|_| {
            tracing::debug!(post_id = %id, "Preview token mismatch");
        })
    }

    async fn load(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }
}
