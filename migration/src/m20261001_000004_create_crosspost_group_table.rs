use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CrosspostGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(CrosspostGroup::Id))
                    .col(string(CrosspostGroup::UserId))
                    .col(string(CrosspostGroup::Name))
                    .col(string(CrosspostGroup::ParentChannelId))
                    .col(timestamp(CrosspostGroup::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Group names are unique per user
        manager
            .create_index(
                Index::create()
                    .name("idx_crosspost_group_user_name")
                    .table(CrosspostGroup::Table)
                    .col(CrosspostGroup::UserId)
                    .col(CrosspostGroup::Name)
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
                    .name("idx_crosspost_group_user_name")
                    .table(CrosspostGroup::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CrosspostGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CrosspostGroup {
    Table,
    Id,
    UserId,
    Name,
    ParentChannelId,
    CreatedAt,
}
