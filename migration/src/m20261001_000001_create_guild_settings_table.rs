use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildSettings::Table)
                    .if_not_exists()
                    .col(pk_auto(GuildSettings::Id))
                    .col(string_uniq(GuildSettings::GuildId))
                    .col(string(GuildSettings::Prefix))
                    .col(boolean(GuildSettings::Pixiv).default(true))
                    .col(boolean(GuildSettings::Twitter).default(true))
                    .col(boolean(GuildSettings::Deviant).default(true))
                    .col(boolean(GuildSettings::Bluesky).default(true))
                    .col(boolean(GuildSettings::Nhentai).default(true))
                    .col(string(GuildSettings::Repost).default("enabled"))
                    .col(big_integer(GuildSettings::RepostExpiration))
                    .col(integer(GuildSettings::PageLimit))
                    .col(boolean(GuildSettings::Nsfw).default(true))
                    .col(boolean(GuildSettings::Tags).default(true))
                    .col(boolean(GuildSettings::Footer).default(true))
                    .col(boolean(GuildSettings::Crosspost).default(true))
                    .col(boolean(GuildSettings::Reactions).default(true))
                    .col(timestamp(GuildSettings::CreatedAt))
                    .col(timestamp(GuildSettings::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildSettings {
    Table,
    Id,
    GuildId,
    Prefix,
    Pixiv,
    Twitter,
    Deviant,
    Bluesky,
    Nhentai,
    Repost,
    RepostExpiration,
    PageLimit,
    Nsfw,
    Tags,
    Footer,
    Crosspost,
    Reactions,
    CreatedAt,
    UpdatedAt,
}
