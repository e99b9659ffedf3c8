use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{HotelDto, HotelRoomTypes, RoomTypeDto};
use compute::catalog::CatalogIndex;
use tracing::{debug, instrument, warn};

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Fails with 503 when the catalog store could not be reached at startup.
/// Every catalog-backed endpoint is gated on this single flag; the only
/// recovery path is a restart.
pub(crate) fn require_catalog(
    state: &AppState,
) -> Result<Arc<CatalogIndex>, (StatusCode, Json<ErrorResponse>)> {
    state.catalog.clone().ok_or_else(|| {
        warn!("Request rejected: catalog unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(
                "CATALOG_UNAVAILABLE",
                "Catalog unavailable, try again later",
            )),
        )
    })
}

/// Get all hotels of the chain
#[utoipa::path(
    get,
    path = "/api/v1/hotels",
    tag = "catalog",
    responses(
        (status = 200, description = "Hotels retrieved successfully", body = ApiResponse<Vec<HotelDto>>),
        (status = 503, description = "Catalog unavailable", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_hotels(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<HotelDto>>>, (StatusCode, Json<ErrorResponse>)> {
    let catalog = require_catalog(&state)?;

    let hotels: Vec<HotelDto> = catalog
        .hotels()
        .map(|(id, name)| HotelDto {
            id,
            name: name.to_string(),
        })
        .collect();

    debug!("Returning {} hotels", hotels.len());
    let response = ApiResponse {
        data: hotels,
        message: "Hotels retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get the room types offered by one hotel
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{hotel_id}/room-types",
    tag = "catalog",
    params(
        ("hotel_id" = i32, Path, description = "Hotel ID"),
    ),
    responses(
        (status = 200, description = "Room types retrieved successfully", body = ApiResponse<HotelRoomTypes>),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
        (status = 503, description = "Catalog unavailable", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_hotel_room_types(
    Path(hotel_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HotelRoomTypes>>, (StatusCode, Json<ErrorResponse>)> {
    let catalog = require_catalog(&state)?;

    let not_found = |msg: String| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("UNKNOWN_HOTEL_ID", msg)),
        )
    };

    let hotel_name = catalog
        .hotel_name(hotel_id)
        .map_err(|e| not_found(e.to_string()))?
        .to_string();

    let room_types: Vec<RoomTypeDto> = catalog
        .room_types_for(hotel_id)
        .map_err(|e| not_found(e.to_string()))?
        .iter()
        .map(|&id| {
            // Ids in the index always resolve; the resolver built both maps
            // from the same rows
            RoomTypeDto {
                id,
                name: catalog.room_type_name(id).unwrap_or_default().to_string(),
            }
        })
        .collect();

    let response = ApiResponse {
        data: HotelRoomTypes {
            hotel: HotelDto {
                id: hotel_id,
                name: hotel_name,
            },
            room_types,
        },
        message: "Room types retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
