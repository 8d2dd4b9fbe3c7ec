use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum ProjectImages {
    Table,
    ProjectId,
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    ProjectId,
    Published,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on project_images.project_id for loading a project's gallery
        manager
            .create_index(
                Index::create()
                    .name("idx_project_images_project_id")
                    .table(ProjectImages::Table)
                    .col(ProjectImages::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Index on blog_posts.project_id for related-post lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_project_id")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Composite index backing the published blog feed
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_published_created_at")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::Published)
                    .col(BlogPosts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_project_images_project_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_blog_posts_project_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_blog_posts_published_created_at")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
