use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "artist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub genre: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub instagram: String,
    pub twitter: String,
    pub youtube: String,
    pub image_public_id: String,
    pub image_url: String,
    pub status: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_artist::Entity")]
    EventArtist,
}

impl Related<super::event_artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventArtist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
