use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `tools` table and its columns.
#[derive(DeriveIden)]
enum Tools {
    Table,
    Id,
    Name,
    Category,
    Details,
    Proficiency,
    DisplayOrder,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tools::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tools::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tools::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Tools::Category).string_len(255).null())
                    .col(ColumnDef::new(Tools::Details).text().null())
                    .col(ColumnDef::new(Tools::Proficiency).string_len(64).null())
                    .col(
                        ColumnDef::new(Tools::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tools::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tools::Table).to_owned())
            .await
    }
}
