use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000004_create_crosspost_group_table::CrosspostGroup;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CrosspostGroupChannel::Table)
                    .if_not_exists()
                    .col(pk_auto(CrosspostGroupChannel::Id))
                    .col(integer(CrosspostGroupChannel::GroupId))
                    .col(string(CrosspostGroupChannel::ChannelId))
                    .col(integer(CrosspostGroupChannel::Position))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_crosspost_group_channel_group_id")
                            .from(CrosspostGroupChannel::Table, CrosspostGroupChannel::GroupId)
                            .to(CrosspostGroup::Table, CrosspostGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_crosspost_group_channel_group_channel")
                    .table(CrosspostGroupChannel::Table)
                    .col(CrosspostGroupChannel::GroupId)
                    .col(CrosspostGroupChannel::ChannelId)
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
                    .name("idx_crosspost_group_channel_group_channel")
                    .table(CrosspostGroupChannel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CrosspostGroupChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CrosspostGroupChannel {
    Table,
    Id,
    GroupId,
    ChannelId,
    Position,
}
