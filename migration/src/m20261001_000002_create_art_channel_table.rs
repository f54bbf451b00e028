use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000001_create_guild_settings_table::GuildSettings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArtChannel::Table)
                    .if_not_exists()
                    .col(pk_auto(ArtChannel::Id))
                    .col(string(ArtChannel::GuildId))
                    .col(string(ArtChannel::ChannelId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_art_channel_guild_id")
                            .from(ArtChannel::Table, ArtChannel::GuildId)
                            .to(GuildSettings::Table, GuildSettings::GuildId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_art_channel_guild_channel")
                    .table(ArtChannel::Table)
                    .col(ArtChannel::GuildId)
                    .col(ArtChannel::ChannelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_art_channel_guild_channel")
                    .table(ArtChannel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ArtChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ArtChannel {
    Table,
    Id,
    GuildId,
    ChannelId,
}
