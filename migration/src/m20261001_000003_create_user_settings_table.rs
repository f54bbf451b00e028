use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserSettings::Table)
                    .if_not_exists()
                    .col(pk_auto(UserSettings::Id))
                    .col(string_uniq(UserSettings::UserId))
                    .col(boolean(UserSettings::Crosspost).default(true))
                    .col(boolean(UserSettings::Dm).default(true))
                    .col(timestamp(UserSettings::CreatedAt))
                    .col(timestamp(UserSettings::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserSettings {
    Table,
    Id,
    UserId,
    Crosspost,
    Dm,
    CreatedAt,
    UpdatedAt,
}
