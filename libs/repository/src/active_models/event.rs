use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub venue: String,
    pub location: String,
    pub start_date: DateTime,
    pub end_date: Option<DateTime>,
    pub image_public_id: String,
    pub image_url: String,
    pub status: String,
    pub capacity: i32,
    #[sea_orm(column_type = "Double")]
    pub ticket_price: f64,
    pub tickets_sold: i32,
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
