use sea_orm::entity::prelude::*;

/// An aggregated room type, e.g. "Standard Double" or "Suite".
/// Room-type ids are scoped across the whole chain, not per hotel; the
/// `hotel_room_map` join table says which hotels offer which types.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "room_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Relation for the many-to-many relationship with hotels.
    #[sea_orm(has_many = "super::hotel_room_map::Entity")]
    HotelRoomMap,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        super::hotel_room_map::Relation::Hotel.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::hotel_room_map::Relation::RoomType.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
