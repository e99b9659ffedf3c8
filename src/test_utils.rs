#[cfg(test)]
pub mod test_utils {
    use std::sync::Arc;

    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use compute::catalog::{source::fetch_room_map, CatalogIndex};
    use migration::{Migrator, MigratorTrait};
    use moka::future::Cache;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Seed the test catalog: Alpine Lodge offers two room types, Bayview
    /// Hotel offers one. Several endpoint tests rely on exactly this shape.
    pub async fn seed_test_catalog(db: &DatabaseConnection) {
        use model::entities::{hotel, hotel_room_map, room_type};

        let alpine = hotel::ActiveModel {
            name: Set("Alpine Lodge".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create test hotel");

        let bayview = hotel::ActiveModel {
            name: Set("Bayview Hotel".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create test hotel");

        let standard = room_type::ActiveModel {
            name: Set("Standard Double".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create test room type");

        let suite = room_type::ActiveModel {
            name: Set("Suite".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create test room type");

        for (hotel_id, room_type_id) in [
            (alpine.id, standard.id),
            (alpine.id, suite.id),
            (bayview.id, standard.id),
        ] {
            hotel_room_map::ActiveModel {
                hotel_id: Set(hotel_id),
                room_type_id: Set(room_type_id),
            }
            .insert(db)
            .await
            .expect("Failed to create test map row");
        }
    }

    /// Create AppState for testing, with the catalog resolved from the
    /// seeded test database
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;
        seed_test_catalog(&db).await;

        let rows = fetch_room_map(&db)
            .await
            .expect("Failed to fetch test catalog");
        let catalog = CatalogIndex::from_rows(&rows).expect("Failed to build test catalog index");

        let cache = Cache::new(100);

        AppState {
            db,
            catalog: Some(Arc::new(catalog)),
            calculator: Arc::new(compute::default_calculator()),
            cache,
        }
    }

    /// AppState whose catalog fetch "failed": every catalog-backed
    /// endpoint must answer 503
    pub async fn setup_test_app_state_without_catalog() -> AppState {
        let db = setup_test_db().await;
        let cache = Cache::new(100);

        AppState {
            db,
            catalog: None,
            calculator: Arc::new(compute::default_calculator()),
            cache,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        // Initialize tracing for tests
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }
}
