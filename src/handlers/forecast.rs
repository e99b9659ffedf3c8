use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Duration;
use common::{ForecastTable, HotelChart, ViewMode};
use compute::catalog::CatalogIndex;
use compute::error::ComputeError;
use compute::forecast::{ForecastCalculator, ForecastQuery};
use tracing::{debug, error, instrument};

use crate::handlers::catalog::require_catalog;
use crate::helpers::converters::{forecast_result_to_table, table_to_charts};
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse, ForecastRequest};

/// The dashboard's day-count slider bounds.
const MIN_FORECAST_DAYS: u8 = 1;
const MAX_FORECAST_DAYS: u8 = 30;
const DEFAULT_FORECAST_DAYS: u8 = 7;

pub(crate) fn map_compute_error(err: ComputeError) -> (StatusCode, Json<ErrorResponse>) {
    match &err {
        ComputeError::Lookup(msg) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("UNKNOWN_CATALOG_ID", msg.clone())),
        ),
        ComputeError::Date(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("INVALID_DATE_RANGE", msg.clone())),
        ),
        _ => {
            error!("Forecast computation failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("FORECAST_FAILED", err.to_string())),
            )
        }
    }
}

/// Turns the request body into a validated ForecastQuery.
///
/// `end_date = start_date + days`, both endpoints included, which is how
/// the dashboard converts its slider setting into a date range. In
/// detailed mode an omitted room-type selection defaults to every room
/// type of each selected hotel.
fn build_query(
    catalog: &CatalogIndex,
    request: &ForecastRequest,
) -> Result<ForecastQuery, (StatusCode, Json<ErrorResponse>)> {
    let days = request.days.unwrap_or(DEFAULT_FORECAST_DAYS);
    if !(MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "INVALID_DAY_COUNT",
                format!(
                    "Day count {} outside {}..={}",
                    days, MIN_FORECAST_DAYS, MAX_FORECAST_DAYS
                ),
            )),
        ));
    }

    let start_date = request
        .start_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let end_date = start_date + Duration::days(i64::from(days));

    let hotel_ids: BTreeSet<i32> = request.hotel_ids.iter().copied().collect();

    let selected_room_types: BTreeMap<i32, BTreeSet<i32>> = match (request.view_mode, &request.room_types)
    {
        (ViewMode::ByHotel, _) => BTreeMap::new(),
        (ViewMode::ByHotelAndRoomType, Some(selection)) => selection
            .iter()
            .map(|(&hotel_id, room_type_ids)| {
                (hotel_id, room_type_ids.iter().copied().collect())
            })
            .collect(),
        (ViewMode::ByHotelAndRoomType, None) => {
            // The dashboard defaults each hotel's multi-select to all of
            // its room types
            let mut selection = BTreeMap::new();
            for &hotel_id in &hotel_ids {
                let room_types = catalog
                    .room_types_for(hotel_id)
                    .map_err(map_compute_error)?;
                selection.insert(hotel_id, room_types.clone());
            }
            selection
        }
    };

    Ok(ForecastQuery {
        start_date,
        end_date,
        hotel_ids,
        view_mode: request.view_mode,
        selected_room_types,
    })
}

/// Computes the forecast table for a request, going through both caching
/// layers: the response cache here and the query-keyed memoization inside
/// the calculator. All forecast endpoints (table, charts, export) share
/// this path, so they agree on the numbers for a given query.
pub(crate) async fn compute_table(
    state: &AppState,
    catalog: &Arc<CatalogIndex>,
    request: &ForecastRequest,
) -> Result<ForecastTable, (StatusCode, Json<ErrorResponse>)> {
    let cache_key = format!("forecast_{:?}", request);

    if let Some(CachedData::Forecast(table)) = state.cache.get(&cache_key).await {
        debug!("Forecast served from response cache");
        return Ok(table);
    }

    let query = build_query(catalog, request)?;
    let result = state
        .calculator
        .compute_forecast(catalog, &query)
        .map_err(map_compute_error)?;

    let table = forecast_result_to_table(&result).map_err(|e| {
        error!("Failed to convert forecast DataFrame: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("FORECAST_FAILED", e)),
        )
    })?;

    state
        .cache
        .insert(cache_key, CachedData::Forecast(table.clone()))
        .await;

    Ok(table)
}

/// Compute a booking forecast
#[utoipa::path(
    post,
    path = "/api/v1/forecast",
    tag = "forecast",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "Forecast computed successfully", body = ApiResponse<ForecastTable>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Unknown hotel or room type", body = ErrorResponse),
        (status = 503, description = "Catalog unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_forecast(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<ApiResponse<ForecastTable>>, (StatusCode, Json<ErrorResponse>)> {
    let catalog = require_catalog(&state)?;

    let table = compute_table(&state, &catalog, &request).await?;

    let response = ApiResponse {
        data: table,
        message: "Forecast computed successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Compute a booking forecast shaped for line charts
#[utoipa::path(
    post,
    path = "/api/v1/forecast/charts",
    tag = "forecast",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "Charts computed successfully", body = ApiResponse<Vec<HotelChart>>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Unknown hotel or room type", body = ErrorResponse),
        (status = 503, description = "Catalog unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_forecast_charts(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<ApiResponse<Vec<HotelChart>>>, (StatusCode, Json<ErrorResponse>)> {
    let catalog = require_catalog(&state)?;

    let cache_key = format!("charts_{:?}", request);
    if let Some(CachedData::Charts(charts)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: charts,
            message: "Charts retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let table = compute_table(&state, &catalog, &request).await?;

    // One chart per selected hotel, in selection order
    let mut hotels = Vec::with_capacity(request.hotel_ids.len());
    for &hotel_id in &request.hotel_ids {
        let name = catalog.hotel_name(hotel_id).map_err(map_compute_error)?;
        hotels.push((hotel_id, name.to_string()));
    }

    let charts = table_to_charts(&table, &hotels);

    state
        .cache
        .insert(cache_key, CachedData::Charts(charts.clone()))
        .await;

    let response = ApiResponse {
        data: charts,
        message: "Charts computed successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
