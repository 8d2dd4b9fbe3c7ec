use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `site_settings` table and its columns.
///
/// The table holds a single row whose id is always 1; the primary key is what
/// makes the lazy "insert if absent" race-free.
#[derive(DeriveIden)]
enum SiteSettings {
    Table,
    Id,
    SiteTitle,
    OwnerName,
    Bio,
    HeroText,
    ContactEmail,
    ResumeUrl,
    SocialLinks,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SiteSettings::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SiteSettings::SiteTitle).string_len(255).not_null())
                    .col(ColumnDef::new(SiteSettings::OwnerName).string_len(255).not_null())
                    .col(ColumnDef::new(SiteSettings::Bio).text().not_null())
                    .col(ColumnDef::new(SiteSettings::HeroText).text().not_null())
                    .col(ColumnDef::new(SiteSettings::ContactEmail).string_len(255).null())
                    .col(ColumnDef::new(SiteSettings::ResumeUrl).string_len(255).null())
                    .col(ColumnDef::new(SiteSettings::SocialLinks).json().not_null())
                    .col(
                        ColumnDef::new(SiteSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SiteSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SiteSettings::Table).to_owned())
            .await
    }
}
