pub mod source;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::error::{ComputeError, Result};

/// One row of the hotel/room-type catalog join: a hotel offering a room
/// type, with both names resolved. The catalog store may yield the same
/// combination through several join paths; the resolver deduplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMapRow {
    pub hotel_id: i32,
    pub hotel_name: String,
    pub room_type_id: i32,
    pub room_type_name: String,
}

/// Bidirectional name/id lookup tables plus the hotel -> room-type index,
/// built once per catalog fetch and immutable afterwards. Mid-session
/// catalog changes are not reflected; a restart re-resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogIndex {
    hotel_name_to_id: HashMap<String, i32>,
    id_to_hotel_name: BTreeMap<i32, String>,
    room_name_to_id: HashMap<String, i32>,
    id_to_room_name: BTreeMap<i32, String>,
    hotel_room_types: BTreeMap<i32, BTreeSet<i32>>,
}

impl CatalogIndex {
    /// Builds the index from raw catalog rows.
    ///
    /// Within one fetch an id must map to exactly one name and a name to
    /// exactly one id, per entity. A violation is a `Catalog` error, never
    /// a silent overwrite. Pure function of the rows.
    pub fn from_rows(rows: &[RoomMapRow]) -> Result<Self> {
        let mut index = CatalogIndex::default();

        for row in rows {
            insert_pair(
                row.hotel_id,
                &row.hotel_name,
                &mut index.hotel_name_to_id,
                &mut index.id_to_hotel_name,
                "hotel",
            )?;
            insert_pair(
                row.room_type_id,
                &row.room_type_name,
                &mut index.room_name_to_id,
                &mut index.id_to_room_name,
                "room type",
            )?;

            index
                .hotel_room_types
                .entry(row.hotel_id)
                .or_default()
                .insert(row.room_type_id);
        }

        debug!(
            "Catalog index built: {} hotels, {} room types, {} map rows",
            index.id_to_hotel_name.len(),
            index.id_to_room_name.len(),
            rows.len()
        );

        Ok(index)
    }

    /// Resolves a hotel name to its id.
    pub fn hotel_id(&self, name: &str) -> Result<i32> {
        self.hotel_name_to_id
            .get(name)
            .copied()
            .ok_or_else(|| ComputeError::Lookup(format!("Unknown hotel name '{}'", name)))
    }

    /// Resolves a hotel id to its name.
    pub fn hotel_name(&self, id: i32) -> Result<&str> {
        self.id_to_hotel_name
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| ComputeError::Lookup(format!("Unknown hotel id {}", id)))
    }

    /// Resolves a room-type name to its id.
    pub fn room_type_id(&self, name: &str) -> Result<i32> {
        self.room_name_to_id
            .get(name)
            .copied()
            .ok_or_else(|| ComputeError::Lookup(format!("Unknown room type name '{}'", name)))
    }

    /// Resolves a room-type id to its name.
    pub fn room_type_name(&self, id: i32) -> Result<&str> {
        self.id_to_room_name
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| ComputeError::Lookup(format!("Unknown room type id {}", id)))
    }

    /// The distinct room-type ids offered by one hotel.
    pub fn room_types_for(&self, hotel_id: i32) -> Result<&BTreeSet<i32>> {
        self.hotel_room_types
            .get(&hotel_id)
            .ok_or_else(|| ComputeError::Lookup(format!("Unknown hotel id {}", hotel_id)))
    }

    pub fn contains_hotel(&self, hotel_id: i32) -> bool {
        self.id_to_hotel_name.contains_key(&hotel_id)
    }

    /// All hotels in catalog (id) order.
    pub fn hotels(&self) -> impl Iterator<Item = (i32, &str)> {
        self.id_to_hotel_name
            .iter()
            .map(|(id, name)| (*id, name.as_str()))
    }

    /// All room types in catalog (id) order.
    pub fn room_types(&self) -> impl Iterator<Item = (i32, &str)> {
        self.id_to_room_name
            .iter()
            .map(|(id, name)| (*id, name.as_str()))
    }

    pub fn hotel_count(&self) -> usize {
        self.id_to_hotel_name.len()
    }
}

/// Inserts one (id, name) pair into an inverse map pair, rejecting
/// conflicting duplicates in either direction.
fn insert_pair(
    id: i32,
    name: &str,
    name_to_id: &mut HashMap<String, i32>,
    id_to_name: &mut BTreeMap<i32, String>,
    entity: &str,
) -> Result<()> {
    if let Some(existing) = id_to_name.get(&id) {
        if existing != name {
            return Err(ComputeError::Catalog(format!(
                "{} id {} maps to both '{}' and '{}'",
                entity, id, existing, name
            )));
        }
    }
    if let Some(&existing_id) = name_to_id.get(name) {
        if existing_id != id {
            return Err(ComputeError::Catalog(format!(
                "{} name '{}' maps to both ids {} and {}",
                entity, name, existing_id, id
            )));
        }
    }

    id_to_name.insert(id, name.to_string());
    name_to_id.insert(name.to_string(), id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(hotel_id: i32, hotel: &str, room_id: i32, room: &str) -> RoomMapRow {
        RoomMapRow {
            hotel_id,
            hotel_name: hotel.to_string(),
            room_type_id: room_id,
            room_type_name: room.to_string(),
        }
    }

    fn sample_rows() -> Vec<RoomMapRow> {
        vec![
            row(1, "Grand Plaza", 10, "Standard Double"),
            row(1, "Grand Plaza", 11, "Suite"),
            row(2, "Seaside Resort", 10, "Standard Double"),
        ]
    }

    #[test]
    fn test_inverse_maps_round_trip() {
        let index = CatalogIndex::from_rows(&sample_rows()).unwrap();

        for (id, name) in index.hotels().map(|(id, name)| (id, name.to_string())) {
            assert_eq!(index.hotel_id(&name).unwrap(), id);
            assert_eq!(index.hotel_name(id).unwrap(), name);
        }
        for (id, name) in index.room_types().map(|(id, name)| (id, name.to_string())) {
            assert_eq!(index.room_type_id(&name).unwrap(), id);
            assert_eq!(index.room_type_name(id).unwrap(), name);
        }
    }

    #[test]
    fn test_room_types_grouped_by_hotel() {
        let index = CatalogIndex::from_rows(&sample_rows()).unwrap();

        assert_eq!(
            index.room_types_for(1).unwrap(),
            &BTreeSet::from([10, 11])
        );
        assert_eq!(index.room_types_for(2).unwrap(), &BTreeSet::from([10]));
    }

    #[test]
    fn test_duplicate_rows_are_deduplicated() {
        let mut rows = sample_rows();
        // The same combination arriving through a second join path
        rows.push(row(1, "Grand Plaza", 10, "Standard Double"));

        let index = CatalogIndex::from_rows(&rows).unwrap();
        assert_eq!(index.hotel_count(), 2);
        assert_eq!(index.room_types_for(1).unwrap().len(), 2);
    }

    #[test]
    fn test_conflicting_hotel_name_for_id_rejected() {
        let rows = vec![
            row(1, "Grand Plaza", 10, "Standard Double"),
            row(1, "Grand Palace", 11, "Suite"),
        ];
        let err = CatalogIndex::from_rows(&rows).unwrap_err();
        assert!(matches!(err, ComputeError::Catalog(_)), "got {:?}", err);
    }

    #[test]
    fn test_conflicting_hotel_id_for_name_rejected() {
        let rows = vec![
            row(1, "Grand Plaza", 10, "Standard Double"),
            row(2, "Grand Plaza", 10, "Standard Double"),
        ];
        let err = CatalogIndex::from_rows(&rows).unwrap_err();
        assert!(matches!(err, ComputeError::Catalog(_)), "got {:?}", err);
    }

    #[test]
    fn test_conflicting_room_type_rejected() {
        let rows = vec![
            row(1, "Grand Plaza", 10, "Standard Double"),
            row(2, "Seaside Resort", 10, "Twin"),
        ];
        let err = CatalogIndex::from_rows(&rows).unwrap_err();
        assert!(matches!(err, ComputeError::Catalog(_)), "got {:?}", err);
    }

    #[test]
    fn test_construction_is_idempotent() {
        let rows = sample_rows();
        let first = CatalogIndex::from_rows(&rows).unwrap();
        let second = CatalogIndex::from_rows(&rows).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lookup_miss_is_an_error() {
        let index = CatalogIndex::from_rows(&sample_rows()).unwrap();

        assert!(matches!(
            index.hotel_name(99),
            Err(ComputeError::Lookup(_))
        ));
        assert!(matches!(
            index.room_types_for(99),
            Err(ComputeError::Lookup(_))
        ));
        assert!(matches!(
            index.hotel_id("Nonexistent"),
            Err(ComputeError::Lookup(_))
        ));
    }
}
