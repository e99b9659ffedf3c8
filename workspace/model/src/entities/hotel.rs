use sea_orm::entity::prelude::*;

/// A hotel of the chain. One row of the `hotels` catalog table.
/// Hotel names are unique across the chain; the forecast UI addresses
/// hotels by name and resolves them back to ids through the catalog index.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "hotels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Relation for the many-to-many relationship with room types.
    #[sea_orm(has_many = "super::hotel_room_map::Entity")]
    HotelRoomMap,
}

impl Related<super::room_type::Entity> for Entity {
    fn to() -> RelationDef {
        super::hotel_room_map::Relation::RoomType.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::hotel_room_map::Relation::Hotel.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
