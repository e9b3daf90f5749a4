//! Post status transitions.
//!
//! The status graph is `draft -> published -> archived` plus
//! `draft -> archived`. Nothing leaves `archived`, and no operation ever
//! moves a post backwards.

use chrono::{DateTime, Utc};

use super::post::{Post, PostChanges, PostStatus};
use crate::error::DomainError;

impl PostStatus {
    /// Whether `self -> next` is an edge of the status graph.
    ///
    /// `archived -> archived` is accepted so that archiving stays idempotent.
    pub fn can_transition_to(self, next: PostStatus) -> bool {
        use PostStatus::*;

        matches!(
            (self, next),
            (Draft, Published) | (Draft, Archived) | (Published, Archived) | (Archived, Archived)
        )
    }
}

impl Post {
    /// Status a freshly created post starts in.
    pub(crate) fn initial_status(requested: Option<PostStatus>) -> Result<PostStatus, DomainError> {
        match requested.unwrap_or_default() {
            PostStatus::Archived => Err(DomainError::Validation(
                "a post can only be created as draft or published".to_string(),
            )),
            status => Ok(status),
        }
    }

    /// Move a draft to published.
    ///
    /// `published_at` is only stamped if it was never set.
    pub fn publish(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.status {
            PostStatus::Published => {
                return Err(DomainError::Conflict("Post is already published".to_string()));
            }
            status if !status.can_transition_to(PostStatus::Published) => {
                return Err(DomainError::Conflict(format!(
                    "Post cannot be published from status '{status}'"
                )));
            }
            _ => {}
        }

        self.status = PostStatus::Published;
        self.published_at.get_or_insert(now);
        self.updated_at = now;
        Ok(())
    }

    /// Archive the post. Always succeeds; `published_at` is kept.
    pub fn archive(&mut self, now: DateTime<Utc>) {
        debug_assert!(self.status.can_transition_to(PostStatus::Archived));
        self.status = PostStatus::Archived;
        self.updated_at = now;
    }

    /// Apply content/metadata changes. Status and `published_at` are untouched.
    pub fn apply_changes(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        let PostChanges {
            title,
            slug,
            summary,
            body_markdown,
            body_html,
            cover_image_url,
            author_name,
            author_avatar_url,
            target_site,
            tags,
            meta_description,
            og_image_url,
            source_type,
            source_message_id,
        } = changes;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(slug) = slug {
            self.slug = slug;
        }
        if let Some(body_markdown) = body_markdown {
            self.body_markdown = body_markdown;
        }
        if let Some(body_html) = body_html {
            self.body_html = body_html;
        }
        if let Some(author_name) = author_name {
            self.author_name = author_name;
        }
        if let Some(target_site) = target_site {
            self.target_site = target_site;
        }

        // Nullable columns: a provided value replaces, absence keeps.
        replace_if_some(&mut self.summary, summary);
        replace_if_some(&mut self.cover_image_url, cover_image_url);
        replace_if_some(&mut self.author_avatar_url, author_avatar_url);
        replace_if_some(&mut self.tags, tags);
        replace_if_some(&mut self.meta_description, meta_description);
        replace_if_some(&mut self.og_image_url, og_image_url);
        replace_if_some(&mut self.source_type, source_type);
        replace_if_some(&mut self.source_message_id, source_message_id);

        self.updated_at = now;
    }
}

fn replace_if_some<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::fixtures::{draft_post, published_post};

    #[test]
    fn status_graph_only_moves_forward() {
        use PostStatus::*;

        assert!(Draft.can_transition_to(Published));
        assert!(Draft.can_transition_to(Archived));
        assert!(Published.can_transition_to(Archived));
        assert!(!Published.can_transition_to(Draft));
        assert!(!Archived.can_transition_to(Draft));
        assert!(!Archived.can_transition_to(Published));
    }

    #[test]
    fn publish_draft_sets_status_and_timestamp() {
        let mut post = draft_post();
        let later = post.created_at + Duration::minutes(5);

        post.publish(later).unwrap();

        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.published_at, Some(later));
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn republish_is_a_conflict_and_keeps_timestamp() {
        let mut post = published_post();
        let original = post.published_at;
        let before = post.clone();

        let result = post.publish(Utc::now() + Duration::hours(1));

        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert_eq!(post.published_at, original);
        assert_eq!(post, before);
    }

    #[test]
    fn archived_post_cannot_be_published() {
        let mut post = draft_post();
        post.archive(Utc::now());

        assert!(matches!(
            post.publish(Utc::now()),
            Err(DomainError::Conflict(_))
        ));
        assert_eq!(post.status, PostStatus::Archived);
    }

    #[test]
    fn archive_keeps_published_at() {
        let mut post = published_post();
        let published_at = post.published_at;
        let later = Utc::now() + Duration::days(1);

        post.archive(later);

        assert_eq!(post.status, PostStatus::Archived);
        assert_eq!(post.published_at, published_at);
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn rearchive_refreshes_updated_at() {
        let mut post = draft_post();
        let first = post.created_at + Duration::minutes(1);
        let second = first + Duration::minutes(1);

        post.archive(first);
        post.archive(second);

        assert_eq!(post.status, PostStatus::Archived);
        assert!(post.published_at.is_none());
        assert_eq!(post.updated_at, second);
    }

    #[test]
    fn apply_changes_leaves_lifecycle_fields_alone() {
        let mut post = published_post();
        let token = post.preview_token.clone();
        let published_at = post.published_at;
        let later = Utc::now() + Duration::minutes(3);

        post.apply_changes(
            PostChanges {
                title: Some("Renamed".to_string()),
                tags: Some(vec!["rust".to_string()]),
                ..Default::default()
            },
            later,
        );

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.tags, Some(vec!["rust".to_string()]));
        assert_eq!(post.slug, "published-post");
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.published_at, published_at);
        assert_eq!(post.preview_token, token);
        assert_eq!(post.updated_at, later);
    }
}
