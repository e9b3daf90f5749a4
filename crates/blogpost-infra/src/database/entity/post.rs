//! Post entity for SeaORM, backed by the `blog_posts` table.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, NotSet, Set};

use blogpost_core::domain::{Post, PostChanges, PostStatus};

/// Status column, stored as plain text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

impl From<Status> for PostStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Draft => PostStatus::Draft,
            Status::Published => PostStatus::Published,
            Status::Archived => PostStatus::Archived,
        }
    }
}

impl From<PostStatus> for Status {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Draft => Status::Draft,
            PostStatus::Published => Status::Published,
            PostStatus::Archived => Status::Archived,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub app_id: String,
    pub org_id: Option<String>,
    pub user_id: Option<String>,
    pub campaign_id: Option<String>,
    pub run_id: Option<String>,

    pub title: String,
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub body_markdown: String,
    #[sea_orm(column_type = "Text")]
    pub body_html: String,
    pub cover_image_url: Option<String>,

    pub author_name: String,
    pub author_avatar_url: Option<String>,

    pub target_site: String,

    pub status: Status,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub preview_token: Option<String>,

    pub meta_description: Option<String>,
    pub og_image_url: Option<String>,
    pub tags: Option<Vec<String>>,

    pub source_type: Option<String>,
    pub source_message_id: Option<String>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            app_id: model.app_id,
            org_id: model.org_id,
            user_id: model.user_id,
            campaign_id: model.campaign_id,
            run_id: model.run_id,
            title: model.title,
            slug: model.slug,
            summary: model.summary,
            body_markdown: model.body_markdown,
            body_html: model.body_html,
            cover_image_url: model.cover_image_url,
            author_name: model.author_name,
            author_avatar_url: model.author_avatar_url,
            target_site: model.target_site,
            status: model.status.into(),
            published_at: model.published_at.map(Into::into),
            preview_token: model.preview_token,
            meta_description: model.meta_description,
            og_image_url: model.og_image_url,
            tags: model.tags,
            source_type: model.source_type,
            source_message_id: model.source_message_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            app_id: Set(post.app_id),
            org_id: Set(post.org_id),
            user_id: Set(post.user_id),
            campaign_id: Set(post.campaign_id),
            run_id: Set(post.run_id),
            title: Set(post.title),
            slug: Set(post.slug),
            summary: Set(post.summary),
            body_markdown: Set(post.body_markdown),
            body_html: Set(post.body_html),
            cover_image_url: Set(post.cover_image_url),
            author_name: Set(post.author_name),
            author_avatar_url: Set(post.author_avatar_url),
            target_site: Set(post.target_site),
            status: Set(post.status.into()),
            published_at: Set(post.published_at.map(Into::into)),
            preview_token: Set(post.preview_token),
            meta_description: Set(post.meta_description),
            og_image_url: Set(post.og_image_url),
            tags: Set(post.tags),
            source_type: Set(post.source_type),
            source_message_id: Set(post.source_message_id),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}

impl ActiveModel {
    /// Only the columns named in `changes` plus `updated_at`; everything
    /// else stays `NotSet` so an `UPDATE` leaves it alone.
    pub(crate) fn from_changes(changes: &PostChanges, now: DateTimeUtc) -> Self {
        Self {
            title: required(&changes.title),
            slug: required(&changes.slug),
            summary: nullable(&changes.summary),
            body_markdown: required(&changes.body_markdown),
            body_html: required(&changes.body_html),
            cover_image_url: nullable(&changes.cover_image_url),
            author_name: required(&changes.author_name),
            author_avatar_url: nullable(&changes.author_avatar_url),
            target_site: required(&changes.target_site),
            meta_description: nullable(&changes.meta_description),
            og_image_url: nullable(&changes.og_image_url),
            tags: nullable(&changes.tags),
            source_type: nullable(&changes.source_type),
            source_message_id: nullable(&changes.source_message_id),
            updated_at: Set(now.into()),
            ..Default::default()
        }
    }

    /// A status change stamped with `now`.
    pub(crate) fn status_change(status: Status, now: DateTimeUtc) -> Self {
        Self {
            status: Set(status),
            updated_at: Set(now.into()),
            ..Default::default()
        }
    }
}

fn required<V>(value: &Option<V>) -> ActiveValue<V>
where
    V: Clone + Into<Value>,
{
    value.clone().map_or(NotSet, Set)
}

fn nullable<V>(value: &Option<V>) -> ActiveValue<Option<V>>
where
    V: Clone,
    Option<V>: Into<Value>,
{
    value.clone().map_or(NotSet, |v| Set(Some(v)))
}
