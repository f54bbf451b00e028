use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Repost::Table)
                    .if_not_exists()
                    .col(pk_auto(Repost::Id))
                    .col(string(Repost::ChannelId))
                    .col(string(Repost::ArtworkId))
                    .col(string(Repost::Url))
                    .col(string(Repost::GuildId))
                    .col(string(Repost::MessageId))
                    .col(timestamp(Repost::ExpiresAt))
                    .to_owned(),
            )
            .await?;

        // One live record per (channel_id, artwork_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_repost_channel_artwork")
                    .table(Repost::Table)
                    .col(Repost::ChannelId)
                    .col(Repost::ArtworkId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repost_expires_at")
                    .table(Repost::Table)
                    .col(Repost::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_repost_expires_at")
                    .table(Repost::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_repost_channel_artwork")
                    .table(Repost::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Repost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Repost {
    Table,
    Id,
    ChannelId,
    ArtworkId,
    Url,
    GuildId,
    MessageId,
    ExpiresAt,
}
