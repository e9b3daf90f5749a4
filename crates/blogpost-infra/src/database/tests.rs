use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, Value};
use uuid::Uuid;

use blogpost_core::domain::{Post, PostChanges, PostStatus};
use blogpost_core::ports::{BaseRepository, Page, PostFilter, PostRepository};

use crate::database::entity::post::{self, Status};
use crate::database::postgres_repo::PostgresPostRepository;

/// SQL of the single statement the repository sent.
fn only_statement(repo: PostgresPostRepository) -> String {
    let log = repo.db.into_transaction_log();
    assert_eq!(log.len(), 1, "expected one statement, got {log:?}");
    log[0].statements()[0].sql.clone()
}

fn model(slug: &str, status: Status) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        app_id: "test-app".to_owned(),
        org_id: None,
        user_id: None,
        campaign_id: Some("spring".to_owned()),
        run_id: Some("test-run".to_owned()),
        title: "Test Post".to_owned(),
        slug: slug.to_owned(),
        summary: None,
        body_markdown: "# Test".to_owned(),
        body_html: "<h1>Test</h1>".to_owned(),
        cover_image_url: None,
        author_name: "Test Author".to_owned(),
        author_avatar_url: None,
        target_site: "test.com".to_owned(),
        status,
        published_at: (status == Status::Published).then(|| now.into()),
        preview_token: Some("preview-token-123".to_owned()),
        meta_description: None,
        og_image_url: None,
        tags: Some(vec!["rust".to_owned(), "blog".to_owned()]),
        source_type: None,
        source_message_id: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let row = model("test-post", Status::Draft);
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.id, post_id);
    assert_eq!(post.slug, "test-post");
    assert_eq!(post.status, PostStatus::Draft);
    assert_eq!(post.tags, Some(vec!["rust".to_owned(), "blog".to_owned()]));
}

#[tokio::test]
async fn test_insert_returns_stored_post() {
    let row = model("fresh-post", Status::Published);
    let domain: Post = row.clone().into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let stored = repo.insert(domain.clone()).await.unwrap();

    assert_eq!(stored.id, row.id);
    assert_eq!(stored.status, PostStatus::Published);
    assert!(stored.published_at.is_some());
}

#[tokio::test]
async fn test_list_returns_page_and_total() {
    let rows = vec![
        model("second", Status::Archived),
        model("first", Status::Archived),
    ];
    let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(7)))]);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([rows])
        .append_query_results([vec![count_row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let mut filter = PostFilter::for_app("test-app");
    filter.status = Some(PostStatus::Archived);

    let (posts, total) = repo.list(&filter, Page::new(Some(2), None)).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].slug, "second");
    assert_eq!(total, 7);
}

#[tokio::test]
async fn test_find_published_by_slug_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo
        .find_published_by_slug("test.com", "missing")
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_update_fields_writes_only_changed_columns() {
    let mut row = model("edited", Status::Published);
    row.summary = Some("Edited".to_owned());
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let changes = PostChanges {
        summary: Some("Edited".to_owned()),
        ..Default::default()
    };
    let post = repo
        .update_fields(post_id, &changes, Utc::now())
        .await
        .unwrap()
        .expect("row returned");
    assert_eq!(post.status, PostStatus::Published);

    let sql = only_statement(repo);
    assert!(sql.starts_with(r#"UPDATE "blog_posts" SET "summary" = $1, "updated_at" = $2"#), "{sql}");
    for column in ["status", "published_at", "title", "slug", "preview_token"] {
        assert!(!sql.contains(&format!(r#""{column}" ="#)), "{column} written: {sql}");
    }
}

#[tokio::test]
async fn test_publish_draft_is_guarded_on_status() {
    let row = model("going-live", Status::Published);
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let post = repo.publish_draft(post_id, Utc::now()).await.unwrap();
    assert_eq!(post.map(|p| p.status), Some(PostStatus::Published));

    let sql = only_statement(repo);
    assert!(sql.contains(r#""published_at" = COALESCE("published_at","#), "{sql}");
    assert!(sql.contains(r#"AND "blog_posts"."status" = "#), "{sql}");
    assert!(!sql.contains(r#""title" ="#), "{sql}");
}

#[tokio::test]
async fn test_publish_draft_without_matching_row_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let result = repo.publish_draft(Uuid::new_v4(), Utc::now()).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_archive_writes_only_status_and_updated_at() {
    let row = model("retired", Status::Archived);
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let post = repo.archive(post_id, Utc::now()).await.unwrap();
    assert_eq!(post.map(|p| p.status), Some(PostStatus::Archived));

    let sql = only_statement(repo);
    assert!(sql.starts_with(r#"UPDATE "blog_posts" SET "status" = $1, "updated_at" = $2 WHERE"#), "{sql}");
    assert!(!sql.contains(r#""published_at" ="#), "{sql}");
}
