use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "crosspost_group_channel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub group_id: i32,
    pub channel_id: String,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::crosspost_group::Entity",
        from = "Column::GroupId",
        to = "super::crosspost_group::Column::Id",
        on_delete = "Cascade"
    )]
    CrosspostGroup,
}

impl Related<super::crosspost_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CrosspostGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
