use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use common::{
    ChartPoint, ChartSeries, ForecastByHotelPoint, ForecastByRoomTypePoint, ForecastTable,
    HotelChart, HotelDto, HotelRoomTypes, RoomTypeDto, ViewMode,
};
use compute::catalog::CatalogIndex;
use compute::forecast::{cache::ForecastCacheCalculator, ForecastBuilder};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// The catalog index, resolved once at startup. `None` means the
    /// catalog store was unavailable; all forecast functionality stays
    /// disabled until restart.
    pub catalog: Option<Arc<CatalogIndex>>,
    /// Memoizing forecast calculator keyed on query parameters
    pub calculator: Arc<ForecastCacheCalculator<ForecastBuilder>>,
    /// Cache for serialized responses
    pub cache: Cache<String, CachedData>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("catalog_available", &self.catalog.is_some())
            .finish_non_exhaustive()
    }
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Forecast(ForecastTable),
    Charts(Vec<HotelChart>),
}

/// Request body for the forecast endpoints.
///
/// Mirrors the dashboard controls: a day-count slider, a hotel
/// multi-select, a view-mode switch, and (in detailed mode) one room-type
/// multi-select per hotel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForecastRequest {
    /// First forecast date (YYYY-MM-DD); defaults to today
    pub start_date: Option<NaiveDate>,
    /// Number of forecast days ahead (1-30); defaults to 7.
    /// The range is inclusive of both endpoints, so 7 days span 8 dates.
    pub days: Option<u8>,
    /// Ids of the hotels to forecast; an empty list yields an empty result
    pub hotel_ids: Vec<i32>,
    /// Aggregated per hotel, or split per hotel and room type
    pub view_mode: ViewMode,
    /// Detailed mode only: room-type ids to keep, per hotel id. Omitted
    /// means every selected hotel keeps all its room types; a hotel mapped
    /// to an empty list contributes no rows.
    pub room_types: Option<HashMap<i32, Vec<i32>>>,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
    /// Catalog availability ("available" or "unavailable")
    pub catalog: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::catalog::get_hotels,
        crate::handlers::catalog::get_hotel_room_types,
        crate::handlers::forecast::get_forecast,
        crate::handlers::forecast::get_forecast_charts,
        crate::handlers::export::export_forecast,
    ),
    components(
        schemas(
            ApiResponse<Vec<HotelDto>>,
            ApiResponse<HotelRoomTypes>,
            ApiResponse<ForecastTable>,
            ApiResponse<Vec<HotelChart>>,
            ErrorResponse,
            HealthResponse,
            ForecastRequest,
            ViewMode,
            HotelDto,
            RoomTypeDto,
            HotelRoomTypes,
            ForecastTable,
            ForecastByHotelPoint,
            ForecastByRoomTypePoint,
            HotelChart,
            ChartSeries,
            ChartPoint,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Hotel and room-type catalog endpoints"),
        (name = "forecast", description = "Booking forecast endpoints"),
    ),
    info(
        title = "BookRust API",
        description = "Hotel Chain Booking Forecast API - forecasts booking counts per hotel and room type",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
