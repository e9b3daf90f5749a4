//! In-memory post repository - used when no database is configured, and by tests.
//!
//! Ordering and filtering follow the Postgres repository so both stores
//! answer the same queries the same way.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use blogpost_core::domain::{Post, PostChanges, PostStatus};
use blogpost_core::error::RepoError;
use blogpost_core::ports::{BaseRepository, Page, PostFilter, PostRepository};

/// Posts kept in a vector behind an async RwLock.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of posts.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }
}

fn window(posts: Vec<Post>, page: Page) -> Vec<Post> {
    posts
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        posts.push(post.clone());
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn update_fields(
        &self,
        id: Uuid,
        changes: &PostChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        Ok(posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.apply_changes(changes.clone(), now);
            post.clone()
        }))
    }

    async fn publish_draft(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts
            .iter_mut()
            .find(|p| p.id == id && p.status == PostStatus::Draft)
        else {
            return Ok(None);
        };

        if post.publish(now).is_err() {
            return Ok(None);
        }
        Ok(Some(post.clone()))
    }

    async fn archive(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        Ok(posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.archive(now);
            post.clone()
        }))
    }

    async fn slugs_with_prefix(
        &self,
        target_site: &str,
        prefix: &str,
    ) -> Result<Vec<String>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| p.target_site == target_site && p.slug.starts_with(prefix))
            .map(|p| p.slug.clone())
            .collect())
    }

    async fn list(&self, filter: &PostFilter, page: Page) -> Result<(Vec<Post>, u64), RepoError> {
        let mut matching: Vec<Post> = {
            let posts = self.posts.read().await;
            posts.iter().filter(|p| filter.matches(p)).cloned().collect()
        };
        matching.sort_by_key(|p| Reverse(p.created_at));

        let total = matching.len() as u64;
        Ok((window(matching, page), total))
    }

    async fn list_published(&self, target_site: &str, page: Page) -> Result<Vec<Post>, RepoError> {
        let mut published: Vec<Post> = {
            let posts = self.posts.read().await;
            posts
                .iter()
                .filter(|p| p.is_public_on(target_site))
                .cloned()
                .collect()
        };
        published.sort_by_key(|p| Reverse((p.published_at, p.created_at)));

        Ok(window(published, page))
    }

    async fn find_published_by_slug(
        &self,
        target_site: &str,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .find(|p| p.slug == slug && p.is_public_on(target_site))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use blogpost_core::domain::NewPost;

    fn post(title: &str, slug: &str, site: &str, minutes_ago: i64) -> Post {
        let input = NewPost {
            app_id: "test-app".to_string(),
            run_id: "test-run".to_string(),
            title: title.to_string(),
            body_markdown: "# Test".to_string(),
            body_html: "<h1>Test</h1>".to_string(),
            author_name: "Test Author".to_string(),
            target_site: site.to_string(),
            ..Default::default()
        };
        Post::new(input, slug.to_string(), Utc::now() - Duration::minutes(minutes_ago))
            .unwrap()
    }

    #[tokio::test]
    async fn test_slugs_with_prefix_is_scoped_to_site() {
        let repo = InMemoryPostRepository::with_posts(vec![
            post("A", "my-post", "a.com", 3),
            post("B", "my-post-2", "a.com", 2),
            post("C", "my-post", "b.com", 1),
            post("D", "other", "a.com", 0),
        ]);

        let mut slugs = repo.slugs_with_prefix("a.com", "my-post").await.unwrap();
        slugs.sort();

        assert_eq!(slugs, vec!["my-post", "my-post-2"]);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_with_total() {
        let repo = InMemoryPostRepository::with_posts(vec![
            post("Old", "old", "a.com", 30),
            post("New", "new", "a.com", 1),
            post("Mid", "mid", "a.com", 10),
        ]);

        let (posts, total) = repo
            .list(&PostFilter::for_app("test-app"), Page::new(Some(2), None))
            .await
            .unwrap();

        assert_eq!(total, 3);
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid"]);

        let (rest, _) = repo
            .list(&PostFilter::for_app("test-app"), Page::new(Some(2), Some(2)))
            .await
            .unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].slug, "old");
    }

    #[tokio::test]
    async fn test_list_published_orders_by_publication() {
        let mut early = post("Early", "early", "a.com", 60);
        let mut late = post("Late", "late", "a.com", 90);
        let draft = post("Draft", "draft", "a.com", 0);
        let now = Utc::now();
        early.publish(now - Duration::minutes(20)).unwrap();
        late.publish(now - Duration::minutes(5)).unwrap();

        let repo = InMemoryPostRepository::with_posts(vec![early, late, draft]);
        let posts = repo.list_published("a.com", Page::default()).await.unwrap();

        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["late", "early"]);
        assert!(posts.iter().all(|p| p.status == PostStatus::Published));
    }

    #[tokio::test]
    async fn test_writes_to_unknown_post_match_nothing() {
        let repo = InMemoryPostRepository::new();
        let id = Uuid::new_v4();
        let now = Utc::now();

        assert!(
            repo.update_fields(id, &PostChanges::default(), now)
                .await
                .unwrap()
                .is_none()
        );
        assert!(repo.publish_draft(id, now).await.unwrap().is_none());
        assert!(repo.archive(id, now).await.unwrap().is_none());
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_publish_draft_skips_posts_that_moved_on() {
        let mut archived = post("Gone", "gone", "a.com", 5);
        archived.archive(Utc::now());
        let id = archived.id;
        let repo = InMemoryPostRepository::with_posts(vec![archived]);

        assert!(repo.publish_draft(id, Utc::now()).await.unwrap().is_none());

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, PostStatus::Archived);
        assert!(stored.published_at.is_none());
    }

    #[tokio::test]
    async fn test_update_fields_leaves_status_alone() {
        let draft = post("Draft", "draft", "a.com", 5);
        let id = draft.id;
        let repo = InMemoryPostRepository::with_posts(vec![draft]);
        let published = repo.publish_draft(id, Utc::now()).await.unwrap().unwrap();

        let edited = repo
            .update_fields(
                id,
                &PostChanges {
                    summary: Some("Edited".to_string()),
                    ..Default::default()
                },
                Utc::now(),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(edited.status, PostStatus::Published);
        assert_eq!(edited.published_at, published.published_at);
        assert_eq!(edited.summary.as_deref(), Some("Edited"));
    }
}
