use crate::handlers::{
    catalog::{get_hotel_room_types, get_hotels},
    export::export_forecast,
    forecast::{get_forecast, get_forecast_charts},
    health::health_check,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Catalog routes
        .route("/api/v1/hotels", get(get_hotels))
        .route(
            "/api/v1/hotels/:hotel_id/room-types",
            get(get_hotel_room_types),
        )
        // Forecast routes
        .route("/api/v1/forecast", post(get_forecast))
        .route("/api/v1/forecast/charts", post(get_forecast_charts))
        .route("/api/v1/forecast/export", post(export_forecast))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
