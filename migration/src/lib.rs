pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_guild_settings_table;
mod m20261001_000002_create_art_channel_table;
mod m20261001_000003_create_user_settings_table;
mod m20261001_000004_create_crosspost_group_table;
mod m20261001_000005_create_crosspost_group_channel_table;
mod m20261001_000006_create_repost_table;
mod m20261002_000007_create_posted_artwork_table;
mod m20261002_000008_create_favourite_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_guild_settings_table::Migration),
            Box::new(m20261001_000002_create_art_channel_table::Migration),
            Box::new(m20261001_000003_create_user_settings_table::Migration),
            Box::new(m20261001_000004_create_crosspost_group_table::Migration),
            Box::new(m20261001_000005_create_crosspost_group_channel_table::Migration),
            Box::new(m20261001_000006_create_repost_table::Migration),
            Box::new(m20261002_000007_create_posted_artwork_table::Migration),
            Box::new(m20261002_000008_create_favourite_table::Migration),
        ]
    }
}
