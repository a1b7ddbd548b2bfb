use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artist::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Artist::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Artist::Bio).text().not_null())
                    .col(ColumnDef::new(Artist::Genre).string().not_null())
                    .col(
                        ColumnDef::new(Artist::ContactEmail)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Artist::ContactPhone)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Artist::Instagram).string().not_null())
                    .col(ColumnDef::new(Artist::Twitter).string().not_null())
                    .col(ColumnDef::new(Artist::Youtube).string().not_null())
                    .col(
                        ColumnDef::new(Artist::ImagePublicId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Artist::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Artist::Status).string().not_null())
                    .col(
                        ColumnDef::new(Artist::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Artist::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artist::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Artist {
    Table,
    Id,
    Name,
    Bio,
    Genre,
    ContactEmail,
    ContactPhone,
    Instagram,
    Twitter,
    Youtube,
    ImagePublicId,
    ImageUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}
