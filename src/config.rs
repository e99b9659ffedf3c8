use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use compute::catalog::{source::fetch_room_map, CatalogIndex};
use moka::future::Cache;
use sea_orm::Database;
use tracing::{error, info, warn};

use crate::schemas::AppState;

/// Initialize application state for the given database URL.
///
/// The catalog is resolved exactly once here. If fetching or indexing it
/// fails, the server still starts but with the forecast surface disabled:
/// every catalog-backed endpoint reports the catalog as unavailable until
/// the process is restarted (there is no retry loop).
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    // Connect to database
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    // Resolve the catalog once per session
    let catalog = match fetch_room_map(&db).await {
        Ok(rows) => match CatalogIndex::from_rows(&rows) {
            Ok(index) => {
                info!(
                    "Catalog resolved: {} hotels, {} map rows",
                    index.hotel_count(),
                    rows.len()
                );
                Some(Arc::new(index))
            }
            Err(e) => {
                error!("Catalog rows violate uniqueness invariants: {}", e);
                None
            }
        },
        Err(e) => {
            warn!("Catalog unavailable, forecast endpoints disabled: {}", e);
            None
        }
    };

    // Initialize response cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    // The memoizing forecast calculator shared by all handlers
    let calculator = Arc::new(compute::default_calculator());

    Ok(AppState {
        db,
        catalog,
        calculator,
        cache,
    })
}

/// Initialize application configuration and state from the environment.
pub async fn initialize_app_state() -> Result<AppState> {
    // Load configuration
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://bookrust.db".to_string());

    initialize_app_state_with_url(&database_url).await
}

/// Get bind address from environment or use default
pub fn get_bind_address() -> String {
    std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}
