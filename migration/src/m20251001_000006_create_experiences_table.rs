use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `experiences` table and its columns.
#[derive(DeriveIden)]
enum Experiences {
    Table,
    Id,
    Title,
    Company,
    Location,
    Role,
    StartDate,
    EndDate,
    Ongoing,
    Description,
    DisplayOrder,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Experiences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Experiences::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Experiences::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Experiences::Company).string_len(255).null())
                    .col(ColumnDef::new(Experiences::Location).string_len(255).null())
                    .col(ColumnDef::new(Experiences::Role).string_len(255).null())
                    .col(ColumnDef::new(Experiences::StartDate).date().null())
                    .col(ColumnDef::new(Experiences::EndDate).date().null())
                    .col(
                        ColumnDef::new(Experiences::Ongoing)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Experiences::Description).text().null())
                    .col(
                        ColumnDef::new(Experiences::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Experiences::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Experiences::Table).to_owned())
            .await
    }
}
