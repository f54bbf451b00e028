use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guild_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guild_id: String,
    pub prefix: String,
    pub pixiv: bool,
    pub twitter: bool,
    pub deviant: bool,
    pub bluesky: bool,
    pub nhentai: bool,
    pub repost: String,
    pub repost_expiration: i64,
    pub page_limit: i32,
    pub nsfw: bool,
    pub tags: bool,
    pub footer: bool,
    pub crosspost: bool,
    pub reactions: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::art_channel::Entity")]
    ArtChannel,
}

impl Related<super::art_channel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtChannel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
