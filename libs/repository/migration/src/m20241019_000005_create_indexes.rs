use sea_orm_migration::prelude::*;

use crate::m20241019_000001_create_artist_table::Artist;
use crate::m20241019_000002_create_event_table::Event;
use crate::m20241019_000004_create_announcement_table::Announcement;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn index(
    name: &'static str,
    table: impl IntoIden + 'static,
    col: impl IntoIden + 'static,
) -> (&'static str, IndexCreateStatement) {
    let statement = Index::create().table(table).name(name).col(col).to_owned();

    (name, statement)
}

fn indexes() -> Vec<(&'static str, IndexCreateStatement)> {
    vec![
        index("idx_artist_status", Artist::Table, Artist::Status),
        index("idx_artist_created_at", Artist::Table, Artist::CreatedAt),
        index("idx_event_status", Event::Table, Event::Status),
        index("idx_event_start_date", Event::Table, Event::StartDate),
        index(
            "idx_announcement_is_active",
            Announcement::Table,
            Announcement::IsActive,
        ),
        index(
            "idx_announcement_created_at",
            Announcement::Table,
            Announcement::CreatedAt,
        ),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (_, statement) in indexes() {
            manager.create_index(statement).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in indexes() {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
