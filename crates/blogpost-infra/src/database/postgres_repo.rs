//! PostgreSQL post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use blogpost_core::domain::{Post, PostChanges, PostStatus};
use blogpost_core::error::RepoError;
use blogpost_core::ports::{Page, PostFilter, PostRepository};

use super::entity::post::{self, Entity as PostEntity, Status};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Escape `%`, `_` and `\` so `prefix` matches literally inside LIKE.
fn escape_like(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn filter_condition(filter: &PostFilter) -> Condition {
    Condition::all()
        .add(post::Column::AppId.eq(filter.app_id.as_str()))
        .add_option(filter.org_id.as_deref().map(|v| post::Column::OrgId.eq(v)))
        .add_option(
            filter
                .status
                .map(|s| post::Column::Status.eq(Status::from(s))),
        )
        .add_option(
            filter
                .target_site
                .as_deref()
                .map(|v| post::Column::TargetSite.eq(v)),
        )
        .add_option(
            filter
                .campaign_id
                .as_deref()
                .map(|v| post::Column::CampaignId.eq(v)),
        )
}

fn published_on(target_site: &str) -> Condition {
    Condition::all()
        .add(post::Column::TargetSite.eq(target_site))
        .add(post::Column::Status.eq(Status::from(PostStatus::Published)))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn update_fields(
        &self,
        id: Uuid,
        changes: &PostChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let rows = PostEntity::update_many()
            .set(post::ActiveModel::from_changes(changes, now))
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn publish_draft(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<Post>, RepoError> {
        let stamp = DateTimeWithTimeZone::from(now);
        let published_at = Func::coalesce([
            Expr::col(post::Column::PublishedAt).into(),
            Expr::val(stamp).into(),
        ]);

        let rows = PostEntity::update_many()
            .set(post::ActiveModel::status_change(Status::Published, now))
            .col_expr(post::Column::PublishedAt, SimpleExpr::from(published_at))
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::Status.eq(Status::Draft))
            .exec_with_returning(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn archive(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<Post>, RepoError> {
        let rows = PostEntity::update_many()
            .set(post::ActiveModel::status_change(Status::Archived, now))
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn slugs_with_prefix(
        &self,
        target_site: &str,
        prefix: &str,
    ) -> Result<Vec<String>, RepoError> {
        let pattern = LikeExpr::new(format!("{}%", escape_like(prefix))).escape('\\');

        let slugs = PostEntity::find()
            .select_only()
            .column(post::Column::Slug)
            .filter(post::Column::TargetSite.eq(target_site))
            .filter(post::Column::Slug.like(pattern))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        tracing::debug!(target_site, prefix, found = slugs.len(), "Fetched slug candidates");
        Ok(slugs)
    }

    async fn list(&self, filter: &PostFilter, page: Page) -> Result<(Vec<Post>, u64), RepoError> {
        let condition = filter_condition(filter);

        let posts = PostEntity::find()
            .filter(condition.clone())
            .order_by_desc(post::Column::CreatedAt)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        let total = PostEntity::find()
            .filter(condition)
            .count(&self.db)
            .await
            .map_err(repo_error)?;

        Ok((posts.into_iter().map(Into::into).collect(), total))
    }

    async fn list_published(&self, target_site: &str, page: Page) -> Result<Vec<Post>, RepoError> {
        let posts = PostEntity::find()
            .filter(published_on(target_site))
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::CreatedAt)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(posts.into_iter().map(Into::into).collect())
    }

    async fn find_published_by_slug(
        &self,
        target_site: &str,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let post = PostEntity::find()
            .filter(published_on(target_site))
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(post.map(Into::into))
    }
}
