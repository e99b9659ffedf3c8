use std::collections::HashMap;

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use model::entities::{hotel, hotel_room_map, prelude::Hotel, room_type};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tracing::{info, warn};

/// Demo chain: three hotels with overlapping room-type offerings.
const DEMO_HOTELS: [(&str, &[&str]); 3] = [
    ("Grand Plaza", &["Standard Double", "Twin", "Suite"]),
    ("Seaside Resort", &["Standard Double", "Family Room"]),
    ("Mountain Lodge", &["Twin", "Suite", "Family Room"]),
];

/// Fills the catalog tables with a small demo hotel chain so the forecast
/// endpoints have something to work with. Refuses to touch a catalog that
/// already has hotels.
pub async fn seed_demo_catalog(database_url: &str) -> Result<()> {
    info!("Seeding demo catalog");

    let db: DatabaseConnection = Database::connect(database_url).await?;
    Migrator::up(&db, None).await?;

    let existing = Hotel::find().count(&db).await?;
    if existing > 0 {
        warn!("Catalog already contains {} hotels, not seeding", existing);
        return Ok(());
    }

    let mut room_type_ids: HashMap<&str, i32> = HashMap::new();

    for (hotel_name, room_names) in DEMO_HOTELS {
        let hotel = hotel::ActiveModel {
            name: Set(hotel_name.to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        for &room_name in room_names {
            let room_type_id = match room_type_ids.get(room_name) {
                Some(&id) => id,
                None => {
                    let room = room_type::ActiveModel {
                        name: Set(room_name.to_string()),
                        ..Default::default()
                    }
                    .insert(&db)
                    .await?;
                    room_type_ids.insert(room_name, room.id);
                    room.id
                }
            };

            hotel_room_map::ActiveModel {
                hotel_id: Set(hotel.id),
                room_type_id: Set(room_type_id),
            }
            .insert(&db)
            .await?;
        }

        info!("Seeded hotel '{}' with {} room types", hotel_name, room_names.len());
    }

    info!("Demo catalog seeded successfully!");
    Ok(())
}
