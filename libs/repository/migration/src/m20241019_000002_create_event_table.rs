use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::Title).string().not_null())
                    .col(ColumnDef::new(Event::Description).text().not_null())
                    .col(ColumnDef::new(Event::Venue).string().not_null())
                    .col(ColumnDef::new(Event::Location).string().not_null())
                    .col(
                        ColumnDef::new(Event::StartDate).date_time().not_null(),
                    )
                    .col(ColumnDef::new(Event::EndDate).date_time().null())
                    .col(
                        ColumnDef::new(Event::ImagePublicId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Event::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Event::Status).string().not_null())
                    .col(
                        ColumnDef::new(Event::Capacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Event::TicketPrice)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Event::TicketsSold)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Event::CreatedAt).date_time().not_null(),
                    )
                    .col(
                        ColumnDef::new(Event::UpdatedAt).date_time().not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Title,
    Description,
    Venue,
    Location,
    StartDate,
    EndDate,
    ImagePublicId,
    ImageUrl,
    Status,
    Capacity,
    TicketPrice,
    TicketsSold,
    CreatedAt,
    UpdatedAt,
}
