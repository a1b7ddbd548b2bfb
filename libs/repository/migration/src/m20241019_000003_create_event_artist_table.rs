use sea_orm_migration::prelude::*;

use crate::m20241019_000001_create_artist_table::Artist;
use crate::m20241019_000002_create_event_table::Event;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventArtist::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventArtist::EventId).string().not_null())
                    .col(
                        ColumnDef::new(EventArtist::ArtistId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventArtist::Position)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EventArtist::EventId)
                            .col(EventArtist::ArtistId),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_event_artist_event_id")
                            .from(EventArtist::Table, EventArtist::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_event_artist_artist_id")
                            .from(EventArtist::Table, EventArtist::ArtistId)
                            .to(Artist::Table, Artist::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventArtist::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EventArtist {
    Table,
    EventId,
    ArtistId,
    Position,
}
