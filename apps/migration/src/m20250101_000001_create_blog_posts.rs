use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogPosts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BlogPosts::AppId).text().not_null())
                    .col(ColumnDef::new(BlogPosts::OrgId).text())
                    .col(ColumnDef::new(BlogPosts::UserId).text())
                    .col(ColumnDef::new(BlogPosts::CampaignId).text())
                    .col(ColumnDef::new(BlogPosts::RunId).text())
                    .col(ColumnDef::new(BlogPosts::Title).text().not_null())
                    .col(ColumnDef::new(BlogPosts::Slug).text().not_null())
                    .col(ColumnDef::new(BlogPosts::Summary).text())
                    .col(ColumnDef::new(BlogPosts::BodyMarkdown).text().not_null())
                    .col(ColumnDef::new(BlogPosts::BodyHtml).text().not_null())
                    .col(ColumnDef::new(BlogPosts::CoverImageUrl).text())
                    .col(ColumnDef::new(BlogPosts::AuthorName).text().not_null())
                    .col(ColumnDef::new(BlogPosts::AuthorAvatarUrl).text())
                    .col(ColumnDef::new(BlogPosts::TargetSite).text().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::Status)
                            .text()
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(BlogPosts::PublishedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(BlogPosts::PreviewToken).text())
                    .col(ColumnDef::new(BlogPosts::MetaDescription).text())
                    .col(ColumnDef::new(BlogPosts::OgImageUrl).text())
                    .col(ColumnDef::new(BlogPosts::Tags).array(ColumnType::Text))
                    .col(ColumnDef::new(BlogPosts::SourceType).text())
                    .col(ColumnDef::new(BlogPosts::SourceMessageId).text())
                    .col(
                        ColumnDef::new(BlogPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_posts_app_id")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::AppId)
                    .to_owned(),
            )
            .await?;

        // Not unique: caller-supplied slugs may collide within a site.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_posts_slug_site")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::Slug)
                    .col(BlogPosts::TargetSite)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_posts_target_site_status")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::TargetSite)
                    .col(BlogPosts::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    AppId,
    OrgId,
    UserId,
    CampaignId,
    RunId,
    Title,
    Slug,
    Summary,
    BodyMarkdown,
    BodyHtml,
    CoverImageUrl,
    AuthorName,
    AuthorAvatarUrl,
    TargetSite,
    Status,
    PublishedAt,
    PreviewToken,
    MetaDescription,
    OgImageUrl,
    Tags,
    SourceType,
    SourceMessageId,
    CreatedAt,
    UpdatedAt,
}
