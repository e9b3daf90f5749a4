//! Domain entities and rules - the core business objects.

mod lifecycle;
mod post;
mod slug;
mod visibility;

pub use post::{NewPost, Post, PostChanges, PostStatus};
pub use slug::{SlugCandidate, slugify};
pub use visibility::PublicPost;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, Utc};

    use super::{NewPost, Post, PostStatus};

    pub(crate) fn sample_input() -> NewPost {
        NewPost {
            app_id: "test-app".to_string(),
            run_id: "test-run".to_string(),
            title: "My First Post".to_string(),
            body_markdown: "# Hello".to_string(),
            body_html: "<h1>Hello</h1>".to_string(),
            author_name: "Kevin".to_string(),
            target_site: "x.com".to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn draft_post() -> Post {
        let created = Utc::now() - Duration::hours(1);
        Post::new(sample_input(), "my-first-post".to_string(), created)
            .expect("draft fixture")
    }

    pub(crate) fn published_post() -> Post {
        let created = Utc::now() - Duration::hours(2);
        let input = NewPost {
            title: "Published Post".to_string(),
            status: Some(PostStatus::Published),
            ..sample_input()
        };
        Post::new(input, "published-post".to_string(), created).expect("published fixture")
    }
}
