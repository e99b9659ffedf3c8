use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::{debug, error, instrument};

use crate::handlers::catalog::require_catalog;
use crate::handlers::forecast::compute_table;
use crate::helpers::xlsx::{forecast_table_to_xlsx, XLSX_CONTENT_TYPE};
use crate::schemas::{AppState, ErrorResponse, ForecastRequest};

/// Export a booking forecast as an Excel workbook.
///
/// The export goes through the same memoized computation as the forecast
/// and chart endpoints, so for a given query the downloaded numbers equal
/// the displayed ones.
#[utoipa::path(
    post,
    path = "/api/v1/forecast/export",
    tag = "forecast",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "Excel workbook with the forecast table"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Unknown hotel or room type", body = ErrorResponse),
        (status = 503, description = "Catalog unavailable", body = ErrorResponse),
        (status = 500, description = "Export failed", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn export_forecast(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let catalog = require_catalog(&state)?;

    let table = compute_table(&state, &catalog, &request).await?;

    // No partial file on serialization failure
    let bytes = forecast_table_to_xlsx(&table).map_err(|e| {
        error!("Spreadsheet serialization failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("EXPORT_FAILED", e.to_string())),
        )
    })?;

    let filename = format!(
        "hotel_forecast_{}.xlsx",
        chrono::Utc::now().date_naive().format("%Y-%m-%d")
    );
    debug!("Exporting {} forecast rows as {}", table.len(), filename);

    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, bytes))
}
