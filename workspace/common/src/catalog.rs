use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A hotel as exposed by the catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HotelDto {
    pub id: i32,
    pub name: String,
}

/// A room type as exposed by the catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct RoomTypeDto {
    pub id: i32,
    pub name: String,
}

/// The room types available at one hotel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HotelRoomTypes {
    pub hotel: HotelDto,
    pub room_types: Vec<RoomTypeDto>,
}
