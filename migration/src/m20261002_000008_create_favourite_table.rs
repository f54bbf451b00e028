use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Favourite::Table)
                    .if_not_exists()
                    .col(pk_auto(Favourite::Id))
                    .col(string(Favourite::UserId))
                    .col(string(Favourite::Provider))
                    .col(string(Favourite::ArtworkId))
                    .col(string(Favourite::Url))
                    .col(string_null(Favourite::Title))
                    .col(string(Favourite::Author))
                    .col(string(Favourite::ImageUrl))
                    .col(boolean(Favourite::Nsfw))
                    .col(timestamp(Favourite::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favourite_user_artwork")
                    .table(Favourite::Table)
                    .col(Favourite::UserId)
                    .col(Favourite::Provider)
                    .col(Favourite::ArtworkId)
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
                    .name("idx_favourite_user_artwork")
                    .table(Favourite::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Favourite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Favourite {
    Table,
    Id,
    UserId,
    Provider,
    ArtworkId,
    Url,
    Title,
    Author,
    ImageUrl,
    Nsfw,
    CreatedAt,
}
