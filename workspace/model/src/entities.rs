//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the hotel booking catalog here: the
//! hotels of the chain, the aggregated room types, and the map saying
//! which hotel offers which room type. The catalog is read-only for the
//! forecast service; rows are written by migrations and seed tooling.

pub mod hotel;
pub mod hotel_room_map;
pub mod room_type;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::hotel::Entity as Hotel;
    pub use super::hotel_room_map::Entity as HotelRoomMap;
    pub use super::room_type::Entity as RoomType;
}
