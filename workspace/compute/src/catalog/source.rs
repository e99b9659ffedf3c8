use std::collections::HashMap;

use model::entities::{hotel, hotel_room_map, room_type};
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::{debug, instrument};

use super::RoomMapRow;
use crate::error::{ComputeError, Result};

/// Loads every valid (hotel, room type) combination from the catalog store
/// with both names resolved.
///
/// This is the single query the dashboard runs at startup; a database error
/// here means the catalog is unavailable and the whole forecast surface
/// stays disabled until the next restart.
#[instrument(skip(db))]
pub async fn fetch_room_map(db: &DatabaseConnection) -> Result<Vec<RoomMapRow>> {
    let hotels: HashMap<i32, String> = hotel::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|h| (h.id, h.name))
        .collect();

    let room_types: HashMap<i32, String> = room_type::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();

    let map_rows = hotel_room_map::Entity::find().all(db).await?;
    debug!(
        "Fetched catalog: {} hotels, {} room types, {} map rows",
        hotels.len(),
        room_types.len(),
        map_rows.len()
    );

    map_rows
        .into_iter()
        .map(|m| {
            let hotel_name = hotels.get(&m.hotel_id).ok_or_else(|| {
                ComputeError::Catalog(format!(
                    "hotel_room_map references unknown hotel id {}",
                    m.hotel_id
                ))
            })?;
            let room_type_name = room_types.get(&m.room_type_id).ok_or_else(|| {
                ComputeError::Catalog(format!(
                    "hotel_room_map references unknown room type id {}",
                    m.room_type_id
                ))
            })?;

            Ok(RoomMapRow {
                hotel_id: m.hotel_id,
                hotel_name: hotel_name.clone(),
                room_type_id: m.room_type_id,
                room_type_name: room_type_name.clone(),
            })
        })
        .collect()
}
