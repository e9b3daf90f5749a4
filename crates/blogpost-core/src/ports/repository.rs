use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Post, PostChanges, PostStatus};
use crate::error::RepoError;

/// Generic repository trait for the entity operations every store offers.
///
/// There is no delete: posts are archived, never removed.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// Post repository.
///
/// Writes never replace a whole row: each one touches only the columns it
/// owns, so a content edit cannot undo a concurrent status change. Every
/// write returns the stored row, or `None` when no row matched.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Set the fields present in `changes` and `updated_at`.
    async fn update_fields(
        &self,
        id: Uuid,
        changes: &PostChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError>;

    /// Publish `id` only while it is still a draft; `published_at` is
    /// stamped only if it was never set.
    async fn publish_draft(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<Post>, RepoError>;

    /// Set status to archived and refresh `updated_at`.
    async fn archive(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<Post>, RepoError>;

    /// Slugs under `target_site` that start with `prefix` (literal match).
    async fn slugs_with_prefix(
        &self,
        target_site: &str,
        prefix: &str,
    ) -> Result<Vec<String>, RepoError>;

    /// Internal listing, newest first, with the total matching `filter`.
    async fn list(&self, filter: &PostFilter, page: Page) -> Result<(Vec<Post>, u64), RepoError>;

    /// Published posts of a site, most recently published first.
    async fn list_published(&self, target_site: &str, page: Page) -> Result<Vec<Post>, RepoError>;

    /// The published post with `slug` on `target_site`.
    async fn find_published_by_slug(
        &self,
        target_site: &str,
        slug: &str,
    ) -> Result<Option<Post>, RepoError>;
}

/// Filter for the internal listing. `app_id` is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub app_id: String,
    pub org_id: Option<String>,
    pub status: Option<PostStatus>,
    pub target_site: Option<String>,
    pub campaign_id: Option<String>,
}

impl PostFilter {
    pub fn for_app(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Default::default()
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        fn opt_eq(wanted: &Option<String>, actual: &Option<String>) -> bool {
            wanted.is_none() || wanted == actual
        }

        post.app_id == self.app_id
            && opt_eq(&self.org_id, &post.org_id)
            && self.status.is_none_or(|s| s == post.status)
            && self.target_site.as_ref().is_none_or(|s| *s == post.target_site)
            && opt_eq(&self.campaign_id, &post.campaign_id)
    }
}

/// Limit/offset window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: u64 = 20;
    pub const MAX_LIMIT: u64 = 100;
    /// Largest offset SQL `OFFSET` can bind (a signed 64-bit integer).
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    /// Missing or zero limit falls back to the default; oversized limits and
    /// offsets are capped.
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        let limit = match limit {
            None | Some(0) => Self::DEFAULT_LIMIT,
            Some(n) => n.min(Self::MAX_LIMIT),
        };
        Self {
            limit,
            offset: offset.unwrap_or(0).min(Self::MAX_OFFSET),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
