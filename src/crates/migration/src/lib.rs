pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_catalog_domain;
mod m20240301_000002_create_playlist_domain;
mod m20240301_000003_create_activity_domain;
mod m20240301_000004_create_album_like_domain;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_catalog_domain::Migration),
            Box::new(m20240301_000002_create_playlist_domain::Migration),
            Box::new(m20240301_000003_create_activity_domain::Migration),
            Box::new(m20240301_000004_create_album_like_domain::Migration),
        ]
    }
}
