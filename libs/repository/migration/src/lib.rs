pub use sea_orm_migration::prelude::*;

mod m20241019_000001_create_artist_table;
mod m20241019_000002_create_event_table;
mod m20241019_000003_create_event_artist_table;
mod m20241019_000004_create_announcement_table;
mod m20241019_000005_create_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241019_000001_create_artist_table::Migration),
            Box::new(m20241019_000002_create_event_table::Migration),
            Box::new(m20241019_000003_create_event_artist_table::Migration),
            Box::new(m20241019_000004_create_announcement_table::Migration),
            Box::new(m20241019_000005_create_indexes::Migration),
        ]
    }
}
