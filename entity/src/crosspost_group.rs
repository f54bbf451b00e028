use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "crosspost_group")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub name: String,
    pub parent_channel_id: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::crosspost_group_channel::Entity")]
    CrosspostGroupChannel,
}

impl Related<super::crosspost_group_channel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CrosspostGroupChannel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
