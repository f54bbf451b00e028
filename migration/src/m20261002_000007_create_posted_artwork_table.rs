use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostedArtwork::Table)
                    .if_not_exists()
                    .col(pk_auto(PostedArtwork::Id))
                    .col(string_uniq(PostedArtwork::MessageId))
                    .col(string(PostedArtwork::ChannelId))
                    .col(string(PostedArtwork::GuildId))
                    .col(string(PostedArtwork::Provider))
                    .col(string(PostedArtwork::ArtworkId))
                    .col(string(PostedArtwork::Url))
                    .col(string_null(PostedArtwork::Title))
                    .col(string(PostedArtwork::Author))
                    .col(string(PostedArtwork::ImageUrl))
                    .col(boolean(PostedArtwork::Nsfw))
                    .col(timestamp(PostedArtwork::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostedArtwork::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PostedArtwork {
    Table,
    Id,
    MessageId,
    ChannelId,
    GuildId,
    Provider,
    ArtworkId,
    Url,
    Title,
    Author,
    ImageUrl,
    Nsfw,
    CreatedAt,
}
